// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock intent engine for deterministic testing.
//!
//! `MockIntent` implements `IntentAdapter` with a FIFO queue of scripted
//! replies. When the queue is empty it answers with no fragments, which is
//! what the real engine does for utterances it does not handle.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use careline_core::{
    AdapterType, CarelineError, HealthStatus, IntentAdapter, PluginAdapter, ReplyFragment,
};

/// One scripted engine outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Fragments(Vec<ReplyFragment>),
    Unavailable(String),
    Timeout,
}

/// A mock intent engine that replays scripted outcomes.
pub struct MockIntent {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    received: Arc<Mutex<Vec<(String, String)>>>,
    calls: AtomicUsize,
}

impl MockIntent {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Create a mock pre-loaded with the given outcomes.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            received: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Shorthand for a mock whose first reply is a list of text fragments.
    pub fn replying_texts(recipient: &str, texts: &[&str]) -> Self {
        let fragments = texts
            .iter()
            .map(|t| ReplyFragment::text(recipient, *t))
            .collect();
        Self::with_replies(vec![MockReply::Fragments(fragments)])
    }

    /// Append an outcome to the script.
    pub async fn push(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Number of `dispatch` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every `(sender_id, text)` pair received, in order.
    pub async fn received(&self) -> Vec<(String, String)> {
        self.received.lock().await.clone()
    }
}

impl Default for MockIntent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockIntent {
    fn name(&self) -> &str {
        "mock-intent"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Intent
    }

    async fn health_check(&self) -> Result<HealthStatus, CarelineError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarelineError> {
        Ok(())
    }
}

#[async_trait]
impl IntentAdapter for MockIntent {
    async fn dispatch(
        &self,
        sender_id: &str,
        text: &str,
    ) -> Result<Vec<ReplyFragment>, CarelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .await
            .push((sender_id.to_string(), text.to_string()));

        match self.replies.lock().await.pop_front() {
            None => Ok(Vec::new()),
            Some(MockReply::Fragments(fragments)) => Ok(fragments),
            Some(MockReply::Unavailable(message)) => Err(CarelineError::IntentUnavailable {
                message,
                source: None,
            }),
            Some(MockReply::Timeout) => Err(CarelineError::IntentTimeout {
                duration: Duration::from_secs(10),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_then_answers_empty() {
        let intent = MockIntent::with_replies(vec![
            MockReply::Fragments(vec![ReplyFragment::text("u", "hello")]),
            MockReply::Timeout,
        ]);

        assert_eq!(intent.dispatch("u", "hi").await.unwrap().len(), 1);
        assert!(matches!(
            intent.dispatch("u", "hi").await,
            Err(CarelineError::IntentTimeout { .. })
        ));
        assert!(intent.dispatch("u", "hi").await.unwrap().is_empty());
        assert_eq!(intent.calls(), 3);
        assert_eq!(intent.received().await[0], ("u".to_string(), "hi".to_string()));
    }
}
