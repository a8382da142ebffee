// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bill queries.

use careline_core::{Bill, BillLookup, BillStatus, CarelineError, NewBill, NewLogEntry};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::queries::{conversion_err, logs, users};

fn row_to_bill(row: &rusqlite::Row<'_>) -> rusqlite::Result<Bill> {
    let status: String = row.get(4)?;
    Ok(Bill {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        due_date: row.get(3)?,
        status: status.parse::<BillStatus>().map_err(|e| conversion_err(4, e))?,
    })
}

/// The customer's first bill by insertion order.
pub(crate) fn first_for_user(
    conn: &rusqlite::Connection,
    user_id: i64,
) -> rusqlite::Result<Option<Bill>> {
    conn.query_row(
        "SELECT id, user_id, amount, due_date, status FROM bills
         WHERE user_id = ?1 ORDER BY id ASC LIMIT 1",
        params![user_id],
        row_to_bill,
    )
    .optional()
}

/// Look up the customer by phone and their first bill, writing the audit
/// row in the same transaction.
pub async fn lookup_for_phone(
    db: &Database,
    phone: &str,
    audit: &NewLogEntry,
) -> Result<BillLookup, CarelineError> {
    let phone = phone.to_string();
    let audit = audit.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<BillLookup> {
            let tx = conn.transaction()?;
            let lookup = match users::select_by_phone(&tx, &phone)? {
                None => BillLookup::UserNotFound,
                Some(user) => match first_for_user(&tx, user.id)? {
                    None => BillLookup::NoBill { user },
                    Some(bill) => BillLookup::Found { user, bill },
                },
            };
            logs::insert_entry(&tx, &audit)?;
            tx.commit()?;
            Ok(lookup)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a bill.
pub async fn insert(db: &Database, bill: &NewBill) -> Result<Bill, CarelineError> {
    let bill = bill.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<Bill> {
            conn.execute(
                "INSERT INTO bills (user_id, amount, due_date, status) VALUES (?1, ?2, ?3, ?4)",
                params![bill.user_id, bill.amount, bill.due_date, bill.status.to_string()],
            )?;
            Ok(Bill {
                id: conn.last_insert_rowid(),
                user_id: bill.user_id,
                amount: bill.amount,
                due_date: bill.due_date,
                status: bill.status,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}
