// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every adapter extends the [`PluginAdapter`] base trait and uses
//! `#[async_trait]` so the gateway can hold them as trait objects.

pub mod adapter;
pub mod channel;
pub mod intent;
pub mod store;

pub use adapter::PluginAdapter;
pub use channel::ChannelAdapter;
pub use intent::IntentAdapter;
pub use store::DomainStore;
