// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent adapter trait for the external dialogue engine.

use async_trait::async_trait;

use crate::error::CarelineError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ReplyFragment;

/// Client for an external intent-recognition / dialogue service.
///
/// Implementations must not retry on their own: the caller decides whether a
/// failure becomes an HTTP error or a fallback reply.
#[async_trait]
pub trait IntentAdapter: PluginAdapter {
    /// Sends one user utterance and returns the engine's reply fragments in order.
    ///
    /// An empty vector is a valid answer for utterances the engine does not handle.
    async fn dispatch(
        &self,
        sender_id: &str,
        text: &str,
    ) -> Result<Vec<ReplyFragment>, CarelineError>;
}
