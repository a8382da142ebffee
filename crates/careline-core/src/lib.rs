// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Careline chat bridge.
//!
//! This crate provides the error taxonomy, the domain records persisted by the
//! store, the channel/intent wire types, and the adapter traits every backend
//! implements. The gateway only ever talks to adapters through these traits.

pub mod error;
pub mod records;
pub mod traits;
pub mod types;

pub use error::CarelineError;
pub use records::{
    Bill, BillLookup, BillStatus, LogEntry, LogLevel, NewBill, NewLogEntry, NewOutage,
    NewPayment, NewUser, Outage, Payment, PaymentHistory, User,
};
pub use types::{AdapterType, HealthStatus, InboundMessage, OutboundReply, ReplyFragment};

pub use traits::{ChannelAdapter, DomainStore, IntentAdapter, PluginAdapter};
