// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer queries.

use careline_core::{CarelineError, NewLogEntry, NewUser, User};
use chrono::Utc;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::queries::logs;

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        phone: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Find a customer by exact phone within an open connection or transaction.
pub(crate) fn select_by_phone(
    conn: &rusqlite::Connection,
    phone: &str,
) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, phone, name, created_at FROM users WHERE phone = ?1",
        params![phone],
        row_to_user,
    )
    .optional()
}

/// Count registered customers.
pub async fn count(db: &Database) -> Result<i64, CarelineError> {
    db.connection()
        .call(|conn| -> rusqlite::Result<i64> {
            conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Register a customer and write the audit row in one transaction.
///
/// Returns [`CarelineError::Conflict`] when the phone is already registered.
pub async fn register(
    db: &Database,
    user: &NewUser,
    audit: &NewLogEntry,
) -> Result<User, CarelineError> {
    let user = user.clone();
    let audit = audit.clone();
    let phone = user.phone.clone();

    let created = db
        .connection()
        .call(move |conn| -> rusqlite::Result<Option<User>> {
            let tx = conn.transaction()?;
            if select_by_phone(&tx, &user.phone)?.is_some() {
                return Ok(None);
            }
            let created_at = Utc::now();
            tx.execute(
                "INSERT INTO users (phone, name, created_at) VALUES (?1, ?2, ?3)",
                params![user.phone, user.name, created_at],
            )?;
            let id = tx.last_insert_rowid();
            logs::insert_entry(&tx, &audit)?;
            tx.commit()?;
            Ok(Some(User {
                id,
                phone: user.phone,
                name: user.name,
                created_at,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    created.ok_or_else(|| CarelineError::Conflict(format!("phone {phone} is already registered")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::open_temp_db;

    fn new_user(phone: &str, name: &str) -> NewUser {
        NewUser {
            phone: phone.to_string(),
            name: name.to_string(),
        }
    }

    async fn find_by_phone(db: &Database, phone: &'static str) -> Option<User> {
        db.connection()
            .call(move |conn| -> rusqlite::Result<Option<User>> {
                select_by_phone(conn, phone)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn register_and_find_by_phone() {
        let (db, _dir) = open_temp_db().await;

        let user = register(
            &db,
            &new_user("0712345678", "Amina"),
            &NewLogEntry::info("User Amina signed up"),
        )
        .await
        .unwrap();
        assert!(user.id > 0);

        let found = find_by_phone(&db, "0712345678").await.unwrap();
        assert_eq!(found, user);
        assert_eq!(count(&db).await.unwrap(), 1);
        assert!(find_by_phone(&db, "0700000000").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_phone_is_conflict_and_writes_nothing() {
        let (db, _dir) = open_temp_db().await;
        register(&db, &new_user("0712345678", "Amina"), &NewLogEntry::info("first"))
            .await
            .unwrap();

        let err = register(&db, &new_user("0712345678", "Brian"), &NewLogEntry::info("second"))
            .await
            .unwrap_err();
        assert!(matches!(err, CarelineError::Conflict(_)));

        assert_eq!(count(&db).await.unwrap(), 1);
        let logs = logs::recent(&db, 10).await.unwrap();
        assert_eq!(logs.len(), 1, "audit row of the rejected signup must not land");
        assert_eq!(logs[0].message, "first");
    }
}
