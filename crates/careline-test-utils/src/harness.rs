// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end gateway tests.
//!
//! `TestHarness` opens a real SQLite store in a temp directory and builds a
//! config whose database and audit trail paths point inside it.

use std::path::PathBuf;
use std::sync::Arc;

use careline_config::model::{AuditConfig, CarelineConfig, StorageConfig};
use careline_core::{CarelineError, DomainStore, LogEntry};
use careline_storage::{Database, SqliteStore, queries};

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    seed_sample_data: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            seed_sample_data: false,
        }
    }

    /// Seed the sample customer, bill, and outage on open.
    pub fn with_sample_data(mut self) -> Self {
        self.seed_sample_data = true;
        self
    }

    /// Create the temp directory and open the store.
    pub async fn build(self) -> Result<TestHarness, CarelineError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| CarelineError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");
        let trail_path = temp_dir.path().join("whatsapp_log.txt");

        let config = CarelineConfig {
            storage: StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
                wal_mode: true,
                seed_sample_data: self.seed_sample_data,
            },
            audit: AuditConfig {
                trail_path: trail_path.to_string_lossy().to_string(),
            },
            ..CarelineConfig::default()
        };

        let store = SqliteStore::new(config.storage.clone());
        store.initialize().await?;

        Ok(TestHarness {
            store: Arc::new(store),
            config,
            trail_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A migrated SQLite store and matching config, removed on drop.
pub struct TestHarness {
    pub store: Arc<SqliteStore>,
    pub config: CarelineConfig,
    trail_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Location of the audit trail file inside the temp directory.
    pub fn trail_path(&self) -> &PathBuf {
        &self.trail_path
    }

    /// Most recent audit rows, newest first, read through a second
    /// connection to the same database file.
    pub async fn recent_logs(&self, limit: i64) -> Result<Vec<LogEntry>, CarelineError> {
        let db = Database::open(&self.config.storage.database_path, true).await?;
        let logs = queries::logs::recent(&db, limit).await?;
        db.close().await?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_opens_empty_store() {
        let harness = TestHarness::builder().build().await.unwrap();
        assert_eq!(harness.store.count_users().await.unwrap(), 0);
        assert!(!harness.trail_path().exists());
    }

    #[tokio::test]
    async fn harness_can_seed() {
        let harness = TestHarness::builder()
            .with_sample_data()
            .build()
            .await
            .unwrap();
        assert_eq!(harness.store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn harness_reads_audit_rows_written_by_the_store() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness
            .store
            .append_log(&careline_core::NewLogEntry::info("first"))
            .await
            .unwrap();
        harness
            .store
            .append_log(&careline_core::NewLogEntry::info("second"))
            .await
            .unwrap();

        let logs = harness.recent_logs(10).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "second");
    }
}
