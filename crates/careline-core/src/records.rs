// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records persisted by the store.
//!
//! Row types (`User`, `Bill`, ...) carry their database id. The `New*` types
//! are insert payloads. Lookup results that the dialogue actions branch on
//! (`BillLookup`, `PaymentHistory`) are enums so the "not found" paths are
//! handled explicitly rather than through `Option` chains.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum length of an outage description, in characters.
pub const OUTAGE_DESCRIPTION_MAX: usize = 200;

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub phone: String,
    pub name: String,
}

/// Billing state of a bill.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

/// A bill owed by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: BillStatus,
}

/// Insert payload for a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBill {
    pub user_id: i64,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: BillStatus,
}

/// A reported service outage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outage {
    pub id: i64,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Insert payload for an outage. Outages are always created open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOutage {
    pub description: String,
    pub start_time: DateTime<Utc>,
}

impl NewOutage {
    /// Creates an outage starting now, truncating the description to
    /// [`OUTAGE_DESCRIPTION_MAX`] characters.
    pub fn starting_now(description: &str) -> Self {
        Self {
            description: description.chars().take(OUTAGE_DESCRIPTION_MAX).collect(),
            start_time: Utc::now(),
        }
    }
}

/// A payment made by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Insert payload for a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub user_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Severity of an audit log row.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// An append-only audit log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub service: Option<String>,
    pub username: Option<String>,
    pub phone_no: Option<String>,
}

/// Insert payload for an audit log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub service: Option<String>,
    pub username: Option<String>,
    pub phone_no: Option<String>,
}

impl NewLogEntry {
    /// Creates an INFO entry stamped with the current time.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Creates an entry at the given level stamped with the current time.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            service: None,
            username: None,
            phone_no: None,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_no = Some(phone.into());
        self
    }
}

/// Result of looking up the bill for a phone number.
#[derive(Debug, Clone, PartialEq)]
pub enum BillLookup {
    /// No customer is registered under the phone number.
    UserNotFound,
    /// The customer exists but has no bill.
    NoBill { user: User },
    /// The customer's first bill.
    Found { user: User, bill: Bill },
}

/// Result of loading the payment history for a phone number.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentHistory {
    /// No customer is registered under the phone number.
    UserNotFound,
    /// All payments recorded for the customer, possibly empty.
    Found { user: User, payments: Vec<Payment> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn bill_status_defaults_to_pending() {
        assert_eq!(BillStatus::default(), BillStatus::Pending);
        assert_eq!(BillStatus::Overdue.to_string(), "overdue");
        assert_eq!(BillStatus::from_str("paid").unwrap(), BillStatus::Paid);
        assert!(BillStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn log_level_is_uppercase() {
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::from_str("INFO").unwrap(), LogLevel::Info);
    }

    #[test]
    fn outage_description_is_truncated_on_char_boundary() {
        let long = "é".repeat(OUTAGE_DESCRIPTION_MAX + 50);
        let outage = NewOutage::starting_now(&long);
        assert_eq!(outage.description.chars().count(), OUTAGE_DESCRIPTION_MAX);
    }

    #[test]
    fn log_entry_builder_sets_optional_fields() {
        let entry = NewLogEntry::info("Checked bill")
            .with_service("check_bill")
            .with_phone("0712345678");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.service.as_deref(), Some("check_bill"));
        assert_eq!(entry.phone_no.as_deref(), Some("0712345678"));
        assert!(entry.username.is_none());
    }
}
