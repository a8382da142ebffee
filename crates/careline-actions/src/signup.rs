// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer signup.
//!
//! Signup collects a name and then a phone number over several turns. The
//! action is re-run after each turn and derives its stage from the slots.

use careline_core::{CarelineError, DomainStore, NewLogEntry, NewUser};
use tracing::info;

use crate::context::{ActionContext, ActionOutcome, SlotEvent, Slots, filled, slot};
use crate::phone::{INVALID_PHONE_MESSAGE, is_valid_phone};

/// Where a signup conversation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStage<'a> {
    AwaitingName,
    AwaitingPhone,
    Complete { name: &'a str, phone: &'a str },
}

impl<'a> SignupStage<'a> {
    /// Stage implied by the current slots.
    pub fn of(slots: &'a Slots) -> Self {
        let Some(name) = filled(&slots.name) else {
            return Self::AwaitingName;
        };
        match filled(&slots.phone) {
            Some(phone) if is_valid_phone(phone) => Self::Complete { name, phone },
            _ => Self::AwaitingPhone,
        }
    }
}

/// Advances the signup conversation, registering the customer once both
/// name and a valid phone are known.
///
/// A phone that is already registered surfaces as [`CarelineError::Conflict`].
pub async fn signup(
    ctx: &ActionContext,
    store: &dyn DomainStore,
) -> Result<ActionOutcome, CarelineError> {
    match SignupStage::of(&ctx.slots) {
        SignupStage::AwaitingName => {
            Ok(ActionOutcome::silent().with_event(SlotEvent::set(slot::AWAITING_NAME, true)))
        }
        SignupStage::AwaitingPhone => {
            let awaiting = SlotEvent::set(slot::AWAITING_PHONE, true);
            if filled(&ctx.slots.phone).is_none() {
                return Ok(ActionOutcome::silent().with_event(awaiting));
            }
            Ok(ActionOutcome::reply(INVALID_PHONE_MESSAGE)
                .with_event(SlotEvent::clear(slot::PHONE))
                .with_event(awaiting))
        }
        SignupStage::Complete { name, phone } => {
            let new_user = NewUser {
                phone: phone.to_string(),
                name: name.to_string(),
            };
            let audit = NewLogEntry::info(format!("Signed up: {name}, {phone}"))
                .with_service("signup")
                .with_username(name)
                .with_phone(phone);

            let user = store.register_user(&new_user, &audit).await?;
            info!(sender = %ctx.sender_id, user_id = user.id, "customer signed up");

            Ok(
                ActionOutcome::reply(format!("Signup successful! Welcome, {}!", user.name))
                    .with_event(SlotEvent::clear(slot::NAME))
                    .with_event(SlotEvent::clear(slot::PHONE))
                    .with_event(SlotEvent::set(slot::AWAITING_NAME, false))
                    .with_event(SlotEvent::set(slot::AWAITING_PHONE, false)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careline_test_utils::MemoryStore;
    use serde_json::{Value, json};

    fn ctx(name: Option<&str>, phone: Option<&str>) -> ActionContext {
        ActionContext::new(
            "user",
            Slots {
                name: name.map(String::from),
                phone: phone.map(String::from),
                ..Slots::default()
            },
            "sign up",
        )
    }

    #[test]
    fn stage_follows_slots() {
        assert_eq!(SignupStage::of(&ctx(None, None).slots), SignupStage::AwaitingName);
        assert_eq!(
            SignupStage::of(&ctx(None, Some("0712345678")).slots),
            SignupStage::AwaitingName
        );
        assert_eq!(
            SignupStage::of(&ctx(Some("Amina"), None).slots),
            SignupStage::AwaitingPhone
        );
        assert_eq!(
            SignupStage::of(&ctx(Some("Amina"), Some("123")).slots),
            SignupStage::AwaitingPhone
        );
        assert_eq!(
            SignupStage::of(&ctx(Some("Amina"), Some("0712345678")).slots),
            SignupStage::Complete {
                name: "Amina",
                phone: "0712345678"
            }
        );
    }

    #[tokio::test]
    async fn missing_name_asks_for_it_silently() {
        let store = MemoryStore::new();
        let outcome = signup(&ctx(None, None), &store).await.unwrap();
        assert!(outcome.responses.is_empty());
        assert_eq!(outcome.slot(slot::AWAITING_NAME), Some(&json!(true)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn missing_phone_asks_for_it_silently() {
        let store = MemoryStore::new();
        let outcome = signup(&ctx(Some("Amina"), None), &store).await.unwrap();
        assert!(outcome.responses.is_empty());
        assert_eq!(outcome.slot(slot::AWAITING_PHONE), Some(&json!(true)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected_and_cleared() {
        let store = MemoryStore::new();
        let outcome = signup(&ctx(Some("Amina"), Some("0812345678")), &store)
            .await
            .unwrap();
        assert_eq!(outcome.responses, vec![INVALID_PHONE_MESSAGE.to_string()]);
        assert_eq!(outcome.slot(slot::PHONE), Some(&Value::Null));
        assert_eq!(outcome.slot(slot::AWAITING_PHONE), Some(&json!(true)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn complete_signup_registers_and_resets_slots() {
        let store = MemoryStore::new();
        let outcome = signup(&ctx(Some("Amina"), Some("0712345678")), &store)
            .await
            .unwrap();

        assert_eq!(
            outcome.responses,
            vec!["Signup successful! Welcome, Amina!".to_string()]
        );
        assert_eq!(outcome.slot(slot::NAME), Some(&Value::Null));
        assert_eq!(outcome.slot(slot::PHONE), Some(&Value::Null));
        assert_eq!(outcome.slot(slot::AWAITING_NAME), Some(&json!(false)));
        assert_eq!(outcome.slot(slot::AWAITING_PHONE), Some(&json!(false)));

        let users = store.users().await;
        assert_eq!(users.len(), 1);
        let logs = store.logs().await;
        assert_eq!(logs[0].message, "Signed up: Amina, 0712345678");
        assert_eq!(logs[0].username.as_deref(), Some("Amina"));
    }

    #[tokio::test]
    async fn duplicate_signup_is_conflict() {
        let store = MemoryStore::new();
        signup(&ctx(Some("Amina"), Some("0712345678")), &store)
            .await
            .unwrap();
        let err = signup(&ctx(Some("Brian"), Some("0712345678")), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, CarelineError::Conflict(_)));
        assert_eq!(store.users().await.len(), 1);
    }
}
