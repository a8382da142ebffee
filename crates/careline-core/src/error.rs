// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Careline chat bridge.

use thiserror::Error;

/// The primary error type used across all Careline adapters and handlers.
#[derive(Debug, Error)]
pub enum CarelineError {
    /// Configuration errors (invalid TOML, bad values, missing secrets).
    #[error("configuration error: {0}")]
    Config(String),

    /// A slot or request field failed validation (bad phone format, missing slot).
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A requested entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// The intent engine refused the connection or answered with a non-2xx status.
    #[error("intent service unavailable: {message}")]
    IntentUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The intent engine did not answer within the configured timeout.
    #[error("intent service timed out after {duration:?}")]
    IntentTimeout { duration: std::time::Duration },

    /// A uniqueness rule was violated (duplicate phone on signup).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage backend errors (database unreachable, query failure, bad row).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An inbound channel payload was missing required fields.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CarelineError {
    /// Whether the error was caused by the caller rather than by this service
    /// or one of its collaborators.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CarelineError::Validation { .. }
                | CarelineError::NotFound { .. }
                | CarelineError::Conflict(_)
                | CarelineError::MalformedPayload(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_classified() {
        assert!(CarelineError::Conflict("dup".into()).is_client_error());
        assert!(CarelineError::MalformedPayload("From".into()).is_client_error());
        assert!(!CarelineError::Internal("boom".into()).is_client_error());
        assert!(
            !CarelineError::IntentTimeout {
                duration: std::time::Duration::from_secs(1)
            }
            .is_client_error()
        );
    }

    #[test]
    fn timeout_message_includes_duration() {
        let err = CarelineError::IntentTimeout {
            duration: std::time::Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "intent service timed out after 10s");
    }
}
