// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the channel, intent, and gateway layers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    /// Short label used in health endpoint payloads.
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy(_) => "unhealthy",
        }
    }
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Intent,
    Storage,
}

/// A chat message after channel-specific parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Channel-specific sender identifier (e.g. `whatsapp:+254712345678`).
    pub sender_id: String,
    /// Normalized message text.
    pub text: String,
}

/// A rendered channel reply: the plain text the user reads and the wire
/// document carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub text: String,
    pub document: String,
}

/// One unit of assistant output returned by the intent engine.
///
/// Only `recipient_id` and `text` are interpreted. Every other field the
/// engine sends (buttons, images, custom payloads) is carried in `extra` and
/// serialized back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyFragment {
    /// Conversation the fragment is addressed to.
    #[serde(default)]
    pub recipient_id: String,
    /// Display text, absent for media-only fragments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Structured extras passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReplyFragment {
    /// Creates a text-only fragment.
    pub fn text(recipient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            text: Some(text.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Returns the display text if it is present and not blank.
    pub fn display_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}
