// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite domain store for the Careline chat bridge.
//!
//! WAL-mode SQLite with embedded migrations, a single-writer concurrency
//! model via `tokio-rusqlite`, and typed queries for users, bills, outages,
//! payments, and the audit log. Every query function is one `call` on the
//! writer thread, and every multi-statement query runs in one transaction.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod seed;

pub use adapter::SqliteStore;
pub use database::Database;
