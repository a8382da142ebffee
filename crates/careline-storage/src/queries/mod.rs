// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table.
//!
//! The async functions each make exactly one `call` on the writer thread.
//! The `pub(crate)` synchronous helpers take a borrowed connection or
//! transaction so that multi-statement operations can compose them.

pub mod bills;
pub mod logs;
pub mod outages;
pub mod payments;
pub mod users;

/// Map a text column that failed to parse into a typed enum.
pub(crate) fn conversion_err<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::database::Database;

    /// Open a fresh migrated database in a temp directory.
    pub async fn open_temp_db() -> (Database, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careline-test.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }
}
