// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain store trait for customer, billing, outage, payment, and audit records.

use async_trait::async_trait;

use crate::error::CarelineError;
use crate::records::{BillLookup, NewLogEntry, NewOutage, NewUser, Outage, PaymentHistory, User};
use crate::traits::adapter::PluginAdapter;

/// Persistence for all domain records.
///
/// Teardown goes through [`PluginAdapter::shutdown`].
///
/// Methods that take a `NewLogEntry` write the audit row in the same
/// transaction as their primary work: either both land or neither does.
#[async_trait]
pub trait DomainStore: PluginAdapter {
    /// Opens the backend and applies pending migrations.
    async fn initialize(&self) -> Result<(), CarelineError>;

    // --- Users ---

    /// Returns the number of registered customers.
    async fn count_users(&self) -> Result<i64, CarelineError>;

    /// Registers a customer.
    ///
    /// Fails with [`CarelineError::Conflict`] when the phone is already taken;
    /// no row is written in that case.
    async fn register_user(
        &self,
        user: &NewUser,
        audit: &NewLogEntry,
    ) -> Result<User, CarelineError>;

    // --- Bills and payments ---

    /// Looks up the customer by phone and their first bill.
    async fn lookup_bill(
        &self,
        phone: &str,
        audit: &NewLogEntry,
    ) -> Result<BillLookup, CarelineError>;

    /// Looks up the customer by phone and all of their payments.
    async fn payment_history(
        &self,
        phone: &str,
        audit: &NewLogEntry,
    ) -> Result<PaymentHistory, CarelineError>;

    // --- Outages ---

    /// Records a new open-ended outage.
    async fn report_outage(
        &self,
        outage: &NewOutage,
        audit: &NewLogEntry,
    ) -> Result<Outage, CarelineError>;

    // --- Audit log ---

    /// Appends a standalone audit row and returns its id.
    async fn append_log(&self, entry: &NewLogEntry) -> Result<i64, CarelineError>;
}
