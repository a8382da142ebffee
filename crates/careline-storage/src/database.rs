// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management: PRAGMA setup, migrations, and lifecycle.
//!
//! All statements run on `tokio-rusqlite`'s single background thread, which
//! serializes writers. Do NOT open additional connections for writes.

use std::time::Duration;

use careline_core::CarelineError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into `CarelineError::Storage`.
pub fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> CarelineError
where
    tokio_rusqlite::Error<E>: std::error::Error + Send + Sync + 'static,
{
    CarelineError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the single SQLite writer connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs and run migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, CarelineError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| CarelineError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| -> rusqlite::Result<()> {
            if wal_mode {
                let mode: String = conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    "WAL",
                    |row| row.get(0),
                )?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> rusqlite::Result<Result<(), refinery::Error>> {
            Ok(migrations::run_migrations(conn))
        })
        .await
        .map_err(map_tr_err)?
        .map_err(migrations::migration_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint and truncate the WAL.
    pub async fn checkpoint(&self) -> Result<(), CarelineError> {
        self.conn
            .call(|conn| -> rusqlite::Result<()> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint, then close the connection.
    pub async fn close(self) -> Result<(), CarelineError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(|e| CarelineError::Storage {
            source: Box::new(e),
        })
    }
}
