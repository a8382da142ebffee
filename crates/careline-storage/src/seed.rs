// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample data for local development and demos.

use careline_core::CarelineError;
use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

pub const SAMPLE_PHONE: &str = "0712345678";
pub const SAMPLE_NAME: &str = "Sample User";

/// Which tables received sample rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub user: bool,
    pub bill: bool,
    pub outage: bool,
}

fn table_is_empty(conn: &rusqlite::Connection, table: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count == 0)
}

/// Insert the sample customer, bill, and outage, each only into an empty
/// table. Safe to run on every start.
pub async fn seed_sample_data(db: &Database) -> Result<SeedReport, CarelineError> {
    db.connection()
        .call(|conn| -> rusqlite::Result<SeedReport> {
            let tx = conn.transaction()?;
            let mut report = SeedReport::default();

            if table_is_empty(&tx, "users")? {
                tx.execute(
                    "INSERT INTO users (phone, name, created_at) VALUES (?1, ?2, ?3)",
                    params![SAMPLE_PHONE, SAMPLE_NAME, Utc::now()],
                )?;
                report.user = true;
            }

            let sample_user: Option<i64> = tx
                .query_row(
                    "SELECT id FROM users WHERE phone = ?1",
                    params![SAMPLE_PHONE],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(user_id) = sample_user
                && table_is_empty(&tx, "bills")?
            {
                tx.execute(
                    "INSERT INTO bills (user_id, amount, due_date, status)
                     VALUES (?1, 100.0, ?2, 'pending')",
                    params![user_id, NaiveDate::from_ymd_opt(2025, 10, 1)],
                )?;
                report.bill = true;
            }

            if table_is_empty(&tx, "outages")? {
                tx.execute(
                    "INSERT INTO outages (description, start_time, end_time) VALUES (?1, ?2, NULL)",
                    params![
                        "Sample outage",
                        Utc.with_ymd_and_hms(2025, 9, 19, 0, 0, 0).single()
                    ],
                )?;
                report.outage = true;
            }

            tx.commit()?;
            Ok(report)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
