// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment queries.

use careline_core::{CarelineError, NewLogEntry, NewPayment, Payment, PaymentHistory};
use rusqlite::params;

use crate::database::Database;
use crate::queries::{logs, users};

/// All payments for a customer, in insertion order.
pub(crate) fn select_for_user(
    conn: &rusqlite::Connection,
    user_id: i64,
) -> rusqlite::Result<Vec<Payment>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, amount, date FROM payments WHERE user_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(Payment {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            date: row.get(3)?,
        })
    })?;
    rows.collect()
}

/// Look up the customer by phone and all their payments, writing the audit
/// row in the same transaction.
pub async fn history_for_phone(
    db: &Database,
    phone: &str,
    audit: &NewLogEntry,
) -> Result<PaymentHistory, CarelineError> {
    let phone = phone.to_string();
    let audit = audit.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<PaymentHistory> {
            let tx = conn.transaction()?;
            let history = match users::select_by_phone(&tx, &phone)? {
                None => PaymentHistory::UserNotFound,
                Some(user) => {
                    let payments = select_for_user(&tx, user.id)?;
                    PaymentHistory::Found { user, payments }
                }
            };
            logs::insert_entry(&tx, &audit)?;
            tx.commit()?;
            Ok(history)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a payment.
pub async fn insert(db: &Database, payment: &NewPayment) -> Result<Payment, CarelineError> {
    let payment = payment.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<Payment> {
            conn.execute(
                "INSERT INTO payments (user_id, amount, date) VALUES (?1, ?2, ?3)",
                params![payment.user_id, payment.amount, payment.date],
            )?;
            Ok(Payment {
                id: conn.last_insert_rowid(),
                user_id: payment.user_id,
                amount: payment.amount,
                date: payment.date,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}
