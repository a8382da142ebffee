// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: bindable hosts, a usable
//! engine URL, a non-zero timeout, non-empty paths and texts, and a known log level.

use crate::diagnostic::ConfigError;
use crate::model::CarelineConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &CarelineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    let url = config.intent.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        fail(format!(
            "intent.url `{url}` must start with http:// or https://"
        ));
    }

    if config.intent.timeout_secs == 0 {
        fail("intent.timeout_secs must be at least 1".to_string());
    }

    if config.intent.default_sender.trim().is_empty() {
        fail("intent.default_sender must not be empty".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.audit.trail_path.trim().is_empty() {
        fail("audit.trail_path must not be empty".to_string());
    }

    if config.whatsapp.fallback_text.trim().is_empty() {
        fail("whatsapp.fallback_text must not be empty".to_string());
    }

    if config.whatsapp.unavailable_text.trim().is_empty() {
        fail("whatsapp.unavailable_text must not be empty".to_string());
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "logging.level `{}` must be one of: {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
