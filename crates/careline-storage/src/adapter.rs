// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DomainStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use careline_config::model::StorageConfig;
use careline_core::{
    AdapterType, BillLookup, CarelineError, DomainStore, HealthStatus, NewLogEntry, NewOutage,
    NewUser, Outage, PaymentHistory, PluginAdapter, User,
};

use crate::database::Database;
use crate::queries;
use crate::seed::{self, SeedReport};

/// SQLite-backed domain store.
///
/// The database is opened lazily by [`DomainStore::initialize`]; every
/// other method fails with a storage error until then.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a store for the configured path. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, CarelineError> {
        self.db.get().ok_or_else(|| CarelineError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Insert the sample customer, bill, and outage into empty tables.
    pub async fn seed_sample_data(&self) -> Result<SeedReport, CarelineError> {
        seed::seed_sample_data(self.db()?).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, CarelineError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".to_string()));
        };
        match db
            .connection()
            .call(|conn| -> rusqlite::Result<i64> {
                conn.query_row("SELECT 1", [], |row| row.get(0))
            })
            .await
        {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), CarelineError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl DomainStore for SqliteStore {
    async fn initialize(&self) -> Result<(), CarelineError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| CarelineError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");

        if self.config.seed_sample_data {
            let report = self.seed_sample_data().await?;
            debug!(?report, "sample data seeded");
        }
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, CarelineError> {
        queries::users::count(self.db()?).await
    }

    async fn register_user(
        &self,
        user: &NewUser,
        audit: &NewLogEntry,
    ) -> Result<User, CarelineError> {
        queries::users::register(self.db()?, user, audit).await
    }

    async fn lookup_bill(
        &self,
        phone: &str,
        audit: &NewLogEntry,
    ) -> Result<BillLookup, CarelineError> {
        queries::bills::lookup_for_phone(self.db()?, phone, audit).await
    }

    async fn payment_history(
        &self,
        phone: &str,
        audit: &NewLogEntry,
    ) -> Result<PaymentHistory, CarelineError> {
        queries::payments::history_for_phone(self.db()?, phone, audit).await
    }

    async fn report_outage(
        &self,
        outage: &NewOutage,
        audit: &NewLogEntry,
    ) -> Result<Outage, CarelineError> {
        queries::outages::report(self.db()?, outage, audit).await
    }

    async fn append_log(&self, entry: &NewLogEntry) -> Result<i64, CarelineError> {
        queries::logs::append(self.db()?, entry).await
    }
}
