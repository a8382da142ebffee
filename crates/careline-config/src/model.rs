// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Careline configuration.
///
/// Every section is optional and defaults to values suitable for a local
/// development setup (engine on `localhost:5005`, SQLite in the working directory).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CarelineConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Intent engine connection settings.
    #[serde(default)]
    pub intent: IntentConfig,

    /// SQLite store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// WhatsApp channel reply settings.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Local audit trail settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CarelineConfig {
    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Intent engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntentConfig {
    /// Full URL of the engine's REST webhook.
    #[serde(default = "default_intent_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sender identity used by the direct chat endpoint.
    #[serde(default = "default_sender")]
    pub default_sender: String,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            url: default_intent_url(),
            timeout_secs: default_timeout_secs(),
            default_sender: default_sender(),
        }
    }
}

fn default_intent_url() -> String {
    "http://localhost:5005/webhooks/rest/webhook".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_sender() -> String {
    "user".to_string()
}

/// SQLite store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journaling.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Insert one sample customer, bill, and outage into empty tables at startup.
    #[serde(default)]
    pub seed_sample_data: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: true,
            seed_sample_data: false,
        }
    }
}

fn default_database_path() -> String {
    "careline.db".to_string()
}

fn default_true() -> bool {
    true
}

/// WhatsApp channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Reply used when the engine returns nothing for an utterance.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,

    /// Reply used when the engine cannot be reached.
    #[serde(default = "default_unavailable_text")]
    pub unavailable_text: String,

    /// Lowercase inbound text before forwarding it to the engine.
    #[serde(default = "default_true")]
    pub lowercase_inbound: bool,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            fallback_text: default_fallback_text(),
            unavailable_text: default_unavailable_text(),
            lowercase_inbound: true,
        }
    }
}

fn default_fallback_text() -> String {
    "Sorry, I didn't understand. Try again!".to_string()
}

fn default_unavailable_text() -> String {
    "Sorry, our assistant is temporarily unavailable. Please try again in a few minutes."
        .to_string()
}

/// Local audit trail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Append-only file receiving one line per processed webhook call.
    #[serde(default = "default_trail_path")]
    pub trail_path: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            trail_path: default_trail_path(),
        }
    }
}

fn default_trail_path() -> String {
    "whatsapp_log.txt".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for careline crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_engine() {
        let config = CarelineConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.intent.timeout_secs, 10);
        assert!(config.intent.url.ends_with("/webhooks/rest/webhook"));
        assert_eq!(config.intent.default_sender, "user");
        assert!(config.storage.wal_mode);
        assert!(!config.storage.seed_sample_data);
        assert!(config.whatsapp.lowercase_inbound);
    }

    #[test]
    fn defaults_serialize_to_toml() {
        let rendered = CarelineConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[intent]"));
        assert!(rendered.contains("timeout_secs = 10"));
    }
}
