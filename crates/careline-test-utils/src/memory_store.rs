// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory domain store for action and gateway tests.
//!
//! Mirrors the SQLite store's semantics (first bill by id, newest-first
//! listings, conflict on duplicate phone) and counts every trait call so
//! tests can assert that validation failures never reach the store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use careline_core::{
    AdapterType, Bill, BillLookup, CarelineError, DomainStore, HealthStatus, LogEntry, NewBill,
    NewLogEntry, NewOutage, NewPayment, NewUser, Outage, Payment, PaymentHistory, PluginAdapter,
    User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    bills: Vec<Bill>,
    outages: Vec<Outage>,
    payments: Vec<Payment>,
    logs: Vec<LogEntry>,
}

impl Tables {
    fn user_by_phone(&self, phone: &str) -> Option<User> {
        self.users.iter().find(|u| u.phone == phone).cloned()
    }

    fn push_log(&mut self, entry: &NewLogEntry) -> i64 {
        let id = self.logs.len() as i64 + 1;
        self.logs.push(LogEntry {
            id,
            timestamp: entry.timestamp,
            level: entry.level,
            message: entry.message.clone(),
            service: entry.service.clone(),
            username: entry.username.clone(),
            phone_no: entry.phone_no.clone(),
        });
        id
    }
}

/// A `DomainStore` backed by plain vectors.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `DomainStore` calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert a customer directly, bypassing the call counter.
    pub async fn seed_user(&self, phone: &str, name: &str) -> User {
        let mut tables = self.tables.lock().await;
        let user = User {
            id: tables.users.len() as i64 + 1,
            phone: phone.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        user
    }

    /// Insert a bill directly, bypassing the call counter.
    pub async fn seed_bill(&self, bill: &NewBill) -> Bill {
        let mut tables = self.tables.lock().await;
        let created = Bill {
            id: tables.bills.len() as i64 + 1,
            user_id: bill.user_id,
            amount: bill.amount,
            due_date: bill.due_date,
            status: bill.status,
        };
        tables.bills.push(created.clone());
        created
    }

    /// Insert a payment directly, bypassing the call counter.
    pub async fn seed_payment(&self, payment: &NewPayment) -> Payment {
        let mut tables = self.tables.lock().await;
        let created = Payment {
            id: tables.payments.len() as i64 + 1,
            user_id: payment.user_id,
            amount: payment.amount,
            date: payment.date,
        };
        tables.payments.push(created.clone());
        created
    }

    /// Snapshot of all outages, newest first.
    pub async fn outages(&self) -> Vec<Outage> {
        let mut outages = self.tables.lock().await.outages.clone();
        outages.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        outages
    }

    /// Snapshot of all audit rows, oldest first.
    pub async fn logs(&self) -> Vec<LogEntry> {
        self.tables.lock().await.logs.clone()
    }

    /// Snapshot of all customers.
    pub async fn users(&self) -> Vec<User> {
        self.tables.lock().await.users.clone()
    }

    fn enter(&self) -> Result<(), CarelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CarelineError::Storage {
                source: "memory store set to fail".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, CarelineError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("memory store set to fail".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarelineError> {
        Ok(())
    }
}

#[async_trait]
impl DomainStore for MemoryStore {
    async fn initialize(&self) -> Result<(), CarelineError> {
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, CarelineError> {
        self.enter()?;
        Ok(self.tables.lock().await.users.len() as i64)
    }

    async fn register_user(
        &self,
        user: &NewUser,
        audit: &NewLogEntry,
    ) -> Result<User, CarelineError> {
        self.enter()?;
        let mut tables = self.tables.lock().await;
        if tables.user_by_phone(&user.phone).is_some() {
            return Err(CarelineError::Conflict(format!(
                "phone {} is already registered",
                user.phone
            )));
        }
        let created = User {
            id: tables.users.len() as i64 + 1,
            phone: user.phone.clone(),
            name: user.name.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        tables.push_log(audit);
        Ok(created)
    }

    async fn lookup_bill(
        &self,
        phone: &str,
        audit: &NewLogEntry,
    ) -> Result<BillLookup, CarelineError> {
        self.enter()?;
        let mut tables = self.tables.lock().await;
        let lookup = match tables.user_by_phone(phone) {
            None => BillLookup::UserNotFound,
            Some(user) => match tables.bills.iter().find(|b| b.user_id == user.id).cloned() {
                None => BillLookup::NoBill { user },
                Some(bill) => BillLookup::Found { user, bill },
            },
        };
        tables.push_log(audit);
        Ok(lookup)
    }

    async fn payment_history(
        &self,
        phone: &str,
        audit: &NewLogEntry,
    ) -> Result<PaymentHistory, CarelineError> {
        self.enter()?;
        let mut tables = self.tables.lock().await;
        let history = match tables.user_by_phone(phone) {
            None => PaymentHistory::UserNotFound,
            Some(user) => {
                let payments = tables
                    .payments
                    .iter()
                    .filter(|p| p.user_id == user.id)
                    .cloned()
                    .collect();
                PaymentHistory::Found { user, payments }
            }
        };
        tables.push_log(audit);
        Ok(history)
    }

    async fn report_outage(
        &self,
        outage: &NewOutage,
        audit: &NewLogEntry,
    ) -> Result<Outage, CarelineError> {
        self.enter()?;
        let mut tables = self.tables.lock().await;
        let created = Outage {
            id: tables.outages.len() as i64 + 1,
            description: outage.description.clone(),
            start_time: outage.start_time,
            end_time: None,
        };
        tables.outages.push(created.clone());
        tables.push_log(audit);
        Ok(created)
    }

    async fn append_log(&self, entry: &NewLogEntry) -> Result<i64, CarelineError> {
        self.enter()?;
        Ok(self.tables.lock().await.push_log(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_calls_and_rejects_duplicates() {
        let store = MemoryStore::new();
        let new_user = NewUser {
            phone: "0712345678".into(),
            name: "Amina".into(),
        };

        store
            .register_user(&new_user, &NewLogEntry::info("signup"))
            .await
            .unwrap();
        let err = store
            .register_user(&new_user, &NewLogEntry::info("signup"))
            .await
            .unwrap_err();

        assert!(matches!(err, CarelineError::Conflict(_)));
        assert_eq!(store.calls(), 2);
        assert_eq!(store.users().await.len(), 1);
        assert_eq!(store.logs().await.len(), 1);
    }

    #[tokio::test]
    async fn failing_mode_surfaces_storage_errors() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.count_users().await,
            Err(CarelineError::Storage { .. })
        ));
    }
}
