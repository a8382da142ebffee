// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bill and payment lookups.

use careline_core::{BillLookup, CarelineError, DomainStore, NewLogEntry, PaymentHistory};
use chrono::NaiveDate;
use tracing::info;

use crate::context::{ActionContext, ActionOutcome, SlotEvent, slot};
use crate::phone::INVALID_PHONE_MESSAGE;
use crate::validated_phone;

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found. Please sign up.";
pub const NO_BILL_MESSAGE: &str = "No bill found. Please contact support.";

/// Reports the customer's first bill. Always clears `phone`.
pub async fn check_bill(
    ctx: &ActionContext,
    store: &dyn DomainStore,
) -> Result<ActionOutcome, CarelineError> {
    let Some(phone) = validated_phone(&ctx.slots.phone) else {
        return Ok(
            ActionOutcome::reply(INVALID_PHONE_MESSAGE).with_event(SlotEvent::clear(slot::PHONE))
        );
    };

    let audit = NewLogEntry::info(format!("Checked bill for {phone}"))
        .with_service("check_bill")
        .with_phone(phone);

    let text = match store.lookup_bill(phone, &audit).await? {
        BillLookup::UserNotFound => USER_NOT_FOUND_MESSAGE.to_string(),
        BillLookup::NoBill { .. } => NO_BILL_MESSAGE.to_string(),
        BillLookup::Found { bill, .. } => format!(
            "Your bill: {:.2} KES, due {}, status: {}",
            bill.amount,
            bill.due_date.format("%Y-%m-%d"),
            bill.status
        ),
    };
    info!(sender = %ctx.sender_id, phone, "bill checked");

    Ok(ActionOutcome::reply(text).with_event(SlotEvent::clear(slot::PHONE)))
}

/// Summarizes the customer's payments: total paid and most recent date.
/// Always clears `phone`.
pub async fn payment_status(
    ctx: &ActionContext,
    store: &dyn DomainStore,
) -> Result<ActionOutcome, CarelineError> {
    let Some(phone) = validated_phone(&ctx.slots.phone) else {
        return Ok(
            ActionOutcome::reply(INVALID_PHONE_MESSAGE).with_event(SlotEvent::clear(slot::PHONE))
        );
    };

    let audit = NewLogEntry::info(format!("Checked payment status for {phone}"))
        .with_service("payment_status")
        .with_phone(phone);

    let text = match store.payment_history(phone, &audit).await? {
        PaymentHistory::UserNotFound => USER_NOT_FOUND_MESSAGE.to_string(),
        PaymentHistory::Found { payments, .. } => {
            let total: f64 = payments.iter().map(|p| p.amount).sum();
            // NaiveDate's default is 1970-01-01.
            let last = payments
                .iter()
                .map(|p| p.date)
                .max()
                .unwrap_or_else(NaiveDate::default);
            format!(
                "Payment history for {phone}: {total:.2} KES paid. Last payment: {}.",
                last.format("%Y-%m-%d")
            )
        }
    };
    info!(sender = %ctx.sender_id, phone, "payment status checked");

    Ok(ActionOutcome::reply(text).with_event(SlotEvent::clear(slot::PHONE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Slots;
    use careline_core::{BillStatus, NewBill, NewPayment};
    use careline_test_utils::MemoryStore;

    fn ctx_with_phone(phone: &str) -> ActionContext {
        ActionContext::new(
            "whatsapp:+254712345678",
            Slots {
                phone: Some(phone.to_string()),
                ..Slots::default()
            },
            "check my bill",
        )
    }

    #[tokio::test]
    async fn invalid_phone_never_touches_store() {
        let store = MemoryStore::new();
        for phone in ["12345", "0812345678", "07123"] {
            let outcome = check_bill(&ctx_with_phone(phone), &store).await.unwrap();
            assert_eq!(outcome.responses, vec![INVALID_PHONE_MESSAGE.to_string()]);
            assert_eq!(outcome.slot(slot::PHONE), Some(&serde_json::Value::Null));

            let outcome = payment_status(&ctx_with_phone(phone), &store).await.unwrap();
            assert_eq!(outcome.responses, vec![INVALID_PHONE_MESSAGE.to_string()]);
        }
        let missing = ActionContext::default();
        check_bill(&missing, &store).await.unwrap();
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_customer_is_told_to_sign_up() {
        let store = MemoryStore::new();
        let outcome = check_bill(&ctx_with_phone("0712345678"), &store).await.unwrap();
        assert_eq!(outcome.responses, vec![USER_NOT_FOUND_MESSAGE.to_string()]);
        assert_eq!(store.calls(), 1);
        assert_eq!(store.logs().await[0].message, "Checked bill for 0712345678");
    }

    #[tokio::test]
    async fn customer_without_bill() {
        let store = MemoryStore::new();
        store.seed_user("0712345678", "Amina").await;
        let outcome = check_bill(&ctx_with_phone("0712345678"), &store).await.unwrap();
        assert_eq!(outcome.responses, vec![NO_BILL_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn bill_is_formatted() {
        let store = MemoryStore::new();
        let user = store.seed_user("0712345678", "Amina").await;
        store
            .seed_bill(&NewBill {
                user_id: user.id,
                amount: 100.0,
                due_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                status: BillStatus::Pending,
            })
            .await;

        let outcome = check_bill(&ctx_with_phone("0712345678"), &store).await.unwrap();
        assert_eq!(
            outcome.responses,
            vec!["Your bill: 100.00 KES, due 2025-10-01, status: pending".to_string()]
        );
        assert_eq!(outcome.slot(slot::PHONE), Some(&serde_json::Value::Null));
    }

    #[tokio::test]
    async fn payments_are_totalled_with_latest_date() {
        let store = MemoryStore::new();
        let user = store.seed_user("0712345678", "Amina").await;
        for (amount, date) in [
            (250.0, NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()),
            (100.0, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
        ] {
            store
                .seed_payment(&NewPayment {
                    user_id: user.id,
                    amount,
                    date,
                })
                .await;
        }

        let outcome = payment_status(&ctx_with_phone("0712345678"), &store)
            .await
            .unwrap();
        assert_eq!(
            outcome.responses,
            vec![
                "Payment history for 0712345678: 350.00 KES paid. Last payment: 2025-09-15."
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn no_payments_defaults_to_epoch() {
        let store = MemoryStore::new();
        store.seed_user("0712345678", "Amina").await;
        let outcome = payment_status(&ctx_with_phone("0712345678"), &store)
            .await
            .unwrap();
        assert_eq!(
            outcome.responses,
            vec![
                "Payment history for 0712345678: 0.00 KES paid. Last payment: 1970-01-01."
                    .to_string()
            ]
        );
    }
}
