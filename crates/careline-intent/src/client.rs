// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the dialogue engine's REST channel.
//!
//! Provides [`RasaClient`], which posts one utterance and decodes the reply
//! fragments. It never retries: a failed call is reported to the caller,
//! which decides between an HTTP error and a fallback reply.

use std::time::Duration;

use careline_core::{CarelineError, ReplyFragment};
use serde::Serialize;
use tracing::debug;

/// Request body of the REST channel.
#[derive(Debug, Clone, Serialize)]
pub struct RestMessage<'a> {
    pub sender: &'a str,
    pub message: &'a str,
}

/// HTTP client for the engine's REST webhook.
#[derive(Debug, Clone)]
pub struct RasaClient {
    client: reqwest::Client,
    url: reqwest::Url,
    timeout: Duration,
}

impl RasaClient {
    /// Creates a client posting to `url` with a bounded per-call timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CarelineError> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| CarelineError::Config(format!("invalid intent url {url:?}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CarelineError::IntentUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    /// Root of the engine's server, used for liveness checks.
    pub fn base_url(&self) -> reqwest::Url {
        let mut base = self.url.clone();
        base.set_path("/");
        base.set_query(None);
        base
    }

    fn transport_err(&self, e: reqwest::Error) -> CarelineError {
        if e.is_timeout() {
            return CarelineError::IntentTimeout {
                duration: self.timeout,
            };
        }
        CarelineError::IntentUnavailable {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }

    /// Posts one utterance and returns the reply fragments in order.
    pub async fn send_message(
        &self,
        sender: &str,
        message: &str,
    ) -> Result<Vec<ReplyFragment>, CarelineError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&RestMessage { sender, message })
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;

        let status = response.status();
        debug!(status = %status, sender, "intent engine responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CarelineError::IntentUnavailable {
                message: format!("intent engine returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_err(e))?;
        serde_json::from_str::<Vec<ReplyFragment>>(&body).map_err(|e| {
            CarelineError::IntentUnavailable {
                message: format!("failed to parse intent engine reply: {e}"),
                source: Some(Box::new(e)),
            }
        })
    }

    /// Probes the engine's base URL. Returns the HTTP status on a response.
    pub async fn ping(&self) -> Result<reqwest::StatusCode, CarelineError> {
        let response = self
            .client
            .get(self.base_url())
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;
        Ok(response.status())
    }
}
