// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/careline/careline.toml`, then
//! `~/.config/careline/careline.toml`, then `./careline.toml`, then
//! `CARELINE_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CarelineConfig;
use crate::{LOCAL_CONFIG_FILE, SYSTEM_CONFIG_FILE};

/// Config sections, used to turn `CARELINE_SECTION_KEY` into `section.key`.
const SECTIONS: &[&str] = &["server", "intent", "storage", "whatsapp", "audit", "logging"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
pub fn load_config() -> Result<CarelineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CarelineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CarelineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CarelineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CarelineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CarelineConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("careline").join(LOCAL_CONFIG_FILE))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `CARELINE_INTENT_TIMEOUT_SECS` to `intent.timeout_secs`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// key names containing underscores survive intact.
pub fn env_provider() -> Env {
    Env::prefixed("CARELINE_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("intent_timeout_secs"), "intent.timeout_secs");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("whatsapp_fallback_text"), "whatsapp.fallback_text");
        assert_eq!(map_env_key("server_port"), "server.port");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("something_else"), "something_else");
    }
}
