// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outage queries.

use careline_core::{CarelineError, NewLogEntry, NewOutage, Outage};
use rusqlite::params;

use crate::database::Database;
use crate::queries::logs;

/// Record an open-ended outage and its audit row in one transaction.
pub async fn report(
    db: &Database,
    outage: &NewOutage,
    audit: &NewLogEntry,
) -> Result<Outage, CarelineError> {
    let outage = outage.clone();
    let audit = audit.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<Outage> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO outages (description, start_time, end_time) VALUES (?1, ?2, NULL)",
                params![outage.description, outage.start_time],
            )?;
            let id = tx.last_insert_rowid();
            logs::insert_entry(&tx, &audit)?;
            tx.commit()?;
            Ok(Outage {
                id,
                description: outage.description,
                start_time: outage.start_time,
                end_time: None,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All outages, newest first.
pub async fn list(db: &Database) -> Result<Vec<Outage>, CarelineError> {
    db.connection()
        .call(|conn| -> rusqlite::Result<Vec<Outage>> {
            let mut stmt = conn.prepare(
                "SELECT id, description, start_time, end_time FROM outages
                 ORDER BY start_time DESC, id DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Outage {
                    id: row.get(0)?,
                    description: row.get(1)?,
                    start_time: row.get(2)?,
                    end_time: row.get(3)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::open_temp_db;

    #[tokio::test]
    async fn reported_outage_is_open_ended() {
        let (db, _dir) = open_temp_db().await;

        let outage = report(
            &db,
            &NewOutage::starting_now("no internet in kilimani"),
            &NewLogEntry::info("Outage reported"),
        )
        .await
        .unwrap();
        assert!(outage.end_time.is_none());

        let listed = list(&db).await.unwrap();
        assert_eq!(listed, vec![outage]);
        assert_eq!(logs::recent(&db, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn overlong_description_is_rejected_by_schema() {
        let (db, _dir) = open_temp_db().await;
        let outage = NewOutage {
            description: "x".repeat(201),
            start_time: chrono::Utc::now(),
        };
        let err = report(&db, &outage, &NewLogEntry::info("Outage reported"))
            .await
            .unwrap_err();
        assert!(matches!(err, CarelineError::Storage { .. }));
        assert!(logs::recent(&db, 10).await.unwrap().is_empty());
    }
}
