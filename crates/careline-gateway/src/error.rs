// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from `CarelineError` to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use careline_core::CarelineError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A handler failure rendered as `{ "error": ... }` with a mapped status.
#[derive(Debug)]
pub struct ApiError(pub CarelineError);

impl From<CarelineError> for ApiError {
    fn from(e: CarelineError) -> Self {
        Self(e)
    }
}

/// Unreadable JSON bodies are malformed payloads, answered in the same
/// `{ "error": ... }` shape as every other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CarelineError::MalformedPayload(rejection.body_text()))
    }
}

/// HTTP status for each error kind.
pub fn status_for(error: &CarelineError) -> StatusCode {
    match error {
        CarelineError::MalformedPayload(_) | CarelineError::Validation { .. } => {
            StatusCode::BAD_REQUEST
        }
        CarelineError::NotFound { .. } => StatusCode::NOT_FOUND,
        CarelineError::Conflict(_) => StatusCode::CONFLICT,
        CarelineError::IntentUnavailable { .. } => StatusCode::BAD_GATEWAY,
        CarelineError::IntentTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        CarelineError::Storage { .. } | CarelineError::Config(_) | CarelineError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn engine_failures_map_to_gateway_statuses() {
        assert_eq!(
            status_for(&CarelineError::IntentUnavailable {
                message: "refused".into(),
                source: None
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&CarelineError::IntentTimeout {
                duration: Duration::from_secs(10)
            }),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn client_errors() {
        assert_eq!(
            status_for(&CarelineError::MalformedPayload("missing Body field".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&CarelineError::Conflict("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&CarelineError::NotFound {
                entity: "action".into(),
                key: "x".into()
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_is_internal() {
        assert_eq!(
            status_for(&CarelineError::Storage {
                source: "disk full".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
