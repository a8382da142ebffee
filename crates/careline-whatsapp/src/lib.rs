// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp channel adapter for the Careline chat bridge.
//!
//! Messages arrive through a carrier gateway as form-encoded webhooks
//! (`Body`, `From`) and are answered with a TwiML-style XML document that
//! the gateway relays back to the sender.

pub mod twiml;

use std::collections::HashMap;

use async_trait::async_trait;
use careline_config::model::WhatsAppConfig;
use careline_core::{
    AdapterType, CarelineError, ChannelAdapter, HealthStatus, InboundMessage, OutboundReply,
    PluginAdapter, ReplyFragment,
};
use tracing::debug;

/// Form field carrying the message text.
pub const BODY_FIELD: &str = "Body";
/// Form field carrying the sender address, e.g. `whatsapp:+254712345678`.
pub const FROM_FIELD: &str = "From";

/// Decodes an `application/x-www-form-urlencoded` webhook body.
pub fn decode_form(body: &[u8]) -> Result<HashMap<String, String>, CarelineError> {
    serde_urlencoded::from_bytes(body)
        .map_err(|e| CarelineError::MalformedPayload(format!("invalid form body: {e}")))
}

/// WhatsApp channel adapter.
pub struct WhatsAppChannel {
    config: WhatsAppConfig,
}

impl WhatsAppChannel {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self { config }
    }
}

fn required<'a>(
    fields: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, CarelineError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| CarelineError::MalformedPayload(format!("missing {name} field")))
}

#[async_trait]
impl PluginAdapter for WhatsAppChannel {
    fn name(&self) -> &str {
        "whatsapp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, CarelineError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarelineError> {
        Ok(())
    }
}

impl ChannelAdapter for WhatsAppChannel {
    fn content_type(&self) -> &'static str {
        twiml::CONTENT_TYPE
    }

    fn parse_inbound(
        &self,
        fields: &HashMap<String, String>,
    ) -> Result<InboundMessage, CarelineError> {
        let body = required(fields, BODY_FIELD)?;
        let from = required(fields, FROM_FIELD)?;

        let text = body.trim();
        let text = if self.config.lowercase_inbound {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        debug!(sender = %from, len = text.len(), "inbound whatsapp message");

        Ok(InboundMessage {
            sender_id: from.to_string(),
            text,
        })
    }

    fn format_outbound(&self, fragments: &[ReplyFragment]) -> OutboundReply {
        let mut texts: Vec<&str> = fragments
            .iter()
            .filter_map(ReplyFragment::display_text)
            .collect();
        if texts.is_empty() {
            texts.push(&self.config.fallback_text);
        }
        let text = texts.join("\n\n");
        let document = twiml::message_document(&text);
        OutboundReply { text, document }
    }

    fn fallback_fragment(&self, recipient_id: &str) -> ReplyFragment {
        ReplyFragment::text(recipient_id, &self.config.fallback_text)
    }
}
