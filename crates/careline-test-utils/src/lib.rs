// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Careline unit and integration tests.
//!
//! # Components
//!
//! - [`MemoryStore`] - In-memory `DomainStore` that counts calls
//! - [`MockIntent`] - Scripted intent engine that counts calls
//! - [`TestHarness`] - Temp-dir SQLite store plus config for end-to-end tests

pub mod harness;
pub mod memory_store;
pub mod mock_intent;

pub use harness::TestHarness;
pub use memory_store::MemoryStore;
pub use mock_intent::{MockIntent, MockReply};
