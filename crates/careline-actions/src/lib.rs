// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialogue actions for the Careline chat bridge.
//!
//! Each action reads its slots, validates them (rejecting and clearing the
//! offending slot rather than falling through), makes at most one store call,
//! and returns response texts plus slot mutations for the dialogue engine.
//! Actions hold no state between invocations.

pub mod action;
pub mod billing;
pub mod context;
pub mod info;
pub mod outage;
pub mod phone;
pub mod signup;
pub mod support;

pub use action::{DialogueAction, run};
pub use context::{ActionContext, ActionOutcome, SlotEvent, Slots};
pub use signup::SignupStage;

use context::filled;

/// A filled slot value that passes the phone rule.
pub(crate) fn validated_phone(value: &Option<String>) -> Option<&str> {
    filled(value).filter(|p| phone::is_valid_phone(p))
}
