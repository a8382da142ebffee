// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit log queries.

use careline_core::{CarelineError, LogEntry, LogLevel, NewLogEntry};
use rusqlite::params;

use crate::database::Database;
use crate::queries::conversion_err;

/// Insert an audit row within an open connection or transaction.
pub(crate) fn insert_entry(conn: &rusqlite::Connection, entry: &NewLogEntry) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO logs (timestamp, level, message, service, username, phone_no)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.timestamp,
            entry.level.to_string(),
            entry.message,
            entry.service,
            entry.username,
            entry.phone_no,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Append a standalone audit row.
pub async fn append(db: &Database, entry: &NewLogEntry) -> Result<i64, CarelineError> {
    let entry = entry.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<i64> { insert_entry(conn, &entry) })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Most recent audit rows, newest first.
pub async fn recent(db: &Database, limit: i64) -> Result<Vec<LogEntry>, CarelineError> {
    db.connection()
        .call(move |conn| -> rusqlite::Result<Vec<LogEntry>> {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, level, message, service, username, phone_no
                 FROM logs ORDER BY timestamp DESC, id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                let level: String = row.get(2)?;
                Ok(LogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    level: level.parse::<LogLevel>().map_err(|e| conversion_err(2, e))?,
                    message: row.get(3)?,
                    service: row.get(4)?,
                    username: row.get(5)?,
                    phone_no: row.get(6)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
