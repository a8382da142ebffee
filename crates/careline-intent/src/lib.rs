// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent engine adapter for the Careline chat bridge.
//!
//! Implements [`IntentAdapter`] over a Rasa-style REST channel: one POST per
//! utterance, a bounded timeout, and no retries.

pub mod client;

use std::time::Duration;

use async_trait::async_trait;
use careline_config::model::IntentConfig;
use careline_core::{
    AdapterType, CarelineError, HealthStatus, IntentAdapter, PluginAdapter, ReplyFragment,
};
use tracing::{debug, info};

pub use crate::client::RasaClient;

/// Intent adapter backed by a [`RasaClient`].
pub struct RasaIntent {
    client: RasaClient,
}

impl RasaIntent {
    /// Creates the adapter from the `[intent]` config section.
    pub fn new(config: &IntentConfig) -> Result<Self, CarelineError> {
        let client = RasaClient::new(&config.url, Duration::from_secs(config.timeout_secs))?;
        info!(url = %config.url, timeout_secs = config.timeout_secs, "intent client initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for RasaIntent {
    fn name(&self) -> &str {
        "rasa"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Intent
    }

    async fn health_check(&self) -> Result<HealthStatus, CarelineError> {
        match self.client.ping().await {
            Ok(status) if status.is_success() => Ok(HealthStatus::Healthy),
            Ok(status) => Ok(HealthStatus::Unhealthy(format!("engine returned {status}"))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), CarelineError> {
        Ok(())
    }
}

#[async_trait]
impl IntentAdapter for RasaIntent {
    async fn dispatch(
        &self,
        sender_id: &str,
        text: &str,
    ) -> Result<Vec<ReplyFragment>, CarelineError> {
        let fragments = self.client.send_message(sender_id, text).await?;
        debug!(sender = %sender_id, fragments = fragments.len(), "intent dispatch complete");
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(url: String) -> IntentConfig {
        IntentConfig {
            url,
            timeout_secs: 5,
            default_sender: "user".to_string(),
        }
    }

    #[test]
    fn adapter_identity() {
        let intent =
            RasaIntent::new(&config_for("http://localhost:5005/webhooks/rest/webhook".into()))
                .unwrap();
        assert_eq!(intent.name(), "rasa");
        assert_eq!(intent.adapter_type(), AdapterType::Intent);
    }

    #[tokio::test]
    async fn health_check_reports_reachable_engine() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Hello from Rasa"))
            .mount(&server)
            .await;

        let intent =
            RasaIntent::new(&config_for(format!("{}/webhooks/rest/webhook", server.uri())))
                .unwrap();
        assert_eq!(intent.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_never_errors_when_engine_is_down() {
        let intent =
            RasaIntent::new(&config_for("http://127.0.0.1:9/webhooks/rest/webhook".into()))
                .unwrap();
        assert!(matches!(
            intent.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn dispatch_returns_fragments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"recipient_id": "user", "text": "Hello! How can I help?"}
            ])))
            .mount(&server)
            .await;

        let intent =
            RasaIntent::new(&config_for(format!("{}/webhooks/rest/webhook", server.uri())))
                .unwrap();
        let fragments = intent.dispatch("user", "hi").await.unwrap();
        assert_eq!(fragments, vec![ReplyFragment::text("user", "Hello! How can I help?")]);
    }
}
