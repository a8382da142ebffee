// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use careline_actions::{ActionContext, DialogueAction, SlotEvent, Slots};
use careline_core::{
    CarelineError, HealthStatus, LogLevel, NewLogEntry, NewUser, PluginAdapter, ReplyFragment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::server::GatewayState;

const SERVICE_MESSAGE: &str = "Careline chat bridge is running";

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// POST /chat
///
/// Forwards the text to the intent engine under the default sender and
/// returns its fragments verbatim, or the single fallback fragment when the
/// engine has nothing to say.
pub async fn post_chat(
    State(state): State<GatewayState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Vec<ReplyFragment>>, ApiError> {
    let Json(body) = body?;
    let sender = state.default_sender.as_ref();
    let fragments = state.intent.dispatch(sender, &body.text).await?;
    debug!(sender, fragments = fragments.len(), "chat reply");

    if fragments.is_empty() {
        return Ok(Json(vec![state.channel.fallback_fragment(sender)]));
    }
    Ok(Json(fragments))
}

/// POST /whatsapp
///
/// Carrier webhook. Malformed payloads are rejected with 400 before the
/// engine is called. Engine failures degrade to the unavailable text inside a
/// normal reply document. Every parsed exchange is audited in the store and
/// in the trail file, best effort.
pub async fn post_whatsapp(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let fields = careline_whatsapp::decode_form(&body)?;
    let inbound = state.channel.parse_inbound(&fields)?;
    let sender = inbound.sender_id.as_str();

    let (fragments, level) = match state.intent.dispatch(sender, &inbound.text).await {
        Ok(fragments) => (fragments, LogLevel::Info),
        Err(e) => {
            warn!(sender, error = %e, "intent engine failed, replying with unavailable text");
            (
                vec![ReplyFragment::text(sender, state.unavailable_text.as_ref())],
                LogLevel::Warning,
            )
        }
    };

    let reply = state.channel.format_outbound(&fragments);

    let entry = NewLogEntry::new(
        level,
        format!("WhatsApp from {sender}: {} -> {}", inbound.text, reply.text),
    )
    .with_service("whatsapp")
    .with_phone(sender);
    if let Err(e) = state.store.append_log(&entry).await {
        warn!(sender, error = %e, "failed to write exchange log row");
    }
    if let Err(e) = state.trail.record(sender, &inbound.text, &reply.text).await {
        warn!(sender, error = %e, path = %state.trail.path().display(), "failed to append audit trail");
    }
    info!(sender, "whatsapp exchange complete");

    Ok(([(header::CONTENT_TYPE, state.channel.content_type())], reply.document).into_response())
}

/// Latest user message as tracked by the engine.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LatestMessage {
    pub text: Option<String>,
}

/// Conversation tracker snapshot sent with an action call.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tracker {
    pub sender_id: Option<String>,
    pub slots: Slots,
    pub latest_message: LatestMessage,
}

/// Request body for POST /webhook.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
}

/// One message the engine should utter.
#[derive(Debug, Serialize)]
pub struct ActionResponseText {
    pub text: String,
}

/// Response body for POST /webhook.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub events: Vec<SlotEvent>,
    pub responses: Vec<ActionResponseText>,
}

/// POST /webhook
///
/// Action server entry point: runs the named dialogue action against the
/// tracker's slots and returns slot events and responses.
pub async fn post_webhook(
    State(state): State<GatewayState>,
    body: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Json(body) = body?;
    let action = DialogueAction::from_name(&body.next_action)?;
    let sender_id = body
        .sender_id
        .or(body.tracker.sender_id)
        .unwrap_or_default();
    let ctx = ActionContext::new(
        sender_id,
        body.tracker.slots,
        body.tracker.latest_message.text.unwrap_or_default(),
    );

    let outcome = careline_actions::run(action, &ctx, state.store.as_ref()).await?;
    debug!(action = %action, events = outcome.events.len(), "action complete");

    Ok(Json(ActionResponse {
        events: outcome.events,
        responses: outcome
            .responses
            .into_iter()
            .map(|text| ActionResponseText { text })
            .collect(),
    }))
}

/// GET /
///
/// Liveness plus a customer count. A store failure is reported in the body
/// rather than as an error status.
pub async fn get_root(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    match state.store.count_users().await {
        Ok(count) => Json(serde_json::json!({
            "message": SERVICE_MESSAGE,
            "user_count": count,
        })),
        Err(e) => {
            warn!(error = %e, "user count unavailable");
            Json(serde_json::json!({
                "message": SERVICE_MESSAGE,
                "error": e.to_string(),
            }))
        }
    }
}

/// Request body for POST /add-user.
#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub phone: String,
    pub name: String,
}

/// Response body for POST /add-user.
#[derive(Debug, Serialize)]
pub struct AddUserResponse {
    pub message: String,
    pub user_id: i64,
}

/// POST /add-user
///
/// Admin creation of a customer. A taken phone is a 409.
pub async fn post_add_user(
    State(state): State<GatewayState>,
    body: Result<Json<AddUserRequest>, JsonRejection>,
) -> Result<Json<AddUserResponse>, ApiError> {
    let Json(body) = body?;
    let phone = body.phone.trim();
    let name = body.name.trim();
    if phone.is_empty() {
        return Err(CarelineError::Validation {
            field: "phone".to_string(),
            message: "must not be empty".to_string(),
        }
        .into());
    }
    if name.is_empty() {
        return Err(CarelineError::Validation {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        }
        .into());
    }

    let audit = NewLogEntry::info(format!("Admin added user: {name}, {phone}"))
        .with_service("add_user")
        .with_username(name)
        .with_phone(phone);
    let user = state
        .store
        .register_user(
            &NewUser {
                phone: phone.to_string(),
                name: name.to_string(),
            },
            &audit,
        )
        .await?;
    info!(user_id = user.id, "user added");

    Ok(Json(AddUserResponse {
        message: format!("User {} added", user.name),
        user_id: user.id,
    }))
}

/// Health of one collaborator.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub components: Vec<ComponentHealth>,
}

async fn component_health(adapter: &dyn PluginAdapter) -> ComponentHealth {
    let status = adapter
        .health_check()
        .await
        .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
    let detail = match &status {
        HealthStatus::Healthy => None,
        HealthStatus::Unhealthy(d) => Some(d.clone()),
    };
    ComponentHealth {
        name: adapter.name().to_string(),
        status: status.label().to_string(),
        detail,
    }
}

/// GET /health
///
/// Store and engine health. Always 200; `status` is `ok` only when every
/// component is healthy.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let store_adapter: &dyn PluginAdapter = state.store.as_ref();
    let intent_adapter: &dyn PluginAdapter = state.intent.as_ref();
    let components = vec![
        component_health(store_adapter).await,
        component_health(intent_adapter).await,
    ];
    let status = if components.iter().all(|c| c.status == "healthy") {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use careline_config::CarelineConfig;
    use careline_config::model::AuditConfig;
    use careline_core::{DomainStore, IntentAdapter};
    use careline_test_utils::{MemoryStore, MockIntent, MockReply};
    use careline_whatsapp::WhatsAppChannel;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn engine_failure_is_logged_and_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let config = CarelineConfig {
            audit: AuditConfig {
                trail_path: dir.path().join("trail.txt").to_string_lossy().to_string(),
            },
            ..CarelineConfig::default()
        };
        let store = Arc::new(MemoryStore::new());
        let state = GatewayState::new(
            store.clone() as Arc<dyn DomainStore>,
            Arc::new(MockIntent::with_replies(vec![MockReply::Timeout])) as Arc<dyn IntentAdapter>,
            Arc::new(WhatsAppChannel::new(config.whatsapp.clone())),
            &config,
        );

        let res = post_whatsapp(State(state), Bytes::from_static(b"Body=hi&From=u"))
            .await
            .unwrap();
        assert_eq!(res.status(), axum::http::StatusCode::OK);
        assert!(logs_contain("intent engine failed"));
        assert_eq!(store.logs().await[0].level, LogLevel::Warning);
    }

    #[test]
    fn action_request_accepts_engine_payload() {
        let json = serde_json::json!({
            "next_action": "action_check_bill",
            "sender_id": "whatsapp:+254712345678",
            "tracker": {
                "sender_id": "whatsapp:+254712345678",
                "slots": {"phone": "0712345678", "requested_slot": null},
                "latest_message": {"text": "0712345678", "intent": {"name": "provide_phone"}},
                "events": []
            },
            "domain": {},
            "version": "3.6.0"
        });
        let req: ActionRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.next_action, "action_check_bill");
        assert_eq!(req.tracker.slots.phone.as_deref(), Some("0712345678"));
        assert_eq!(req.tracker.latest_message.text.as_deref(), Some("0712345678"));
    }

    #[test]
    fn action_response_wire_shape() {
        let resp = ActionResponse {
            events: vec![SlotEvent::clear("phone")],
            responses: vec![ActionResponseText {
                text: "User not found. Please sign up.".into(),
            }],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "events": [{"event": "slot", "name": "phone", "value": null}],
                "responses": [{"text": "User not found. Please sign up."}]
            })
        );
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            components: vec![ComponentHealth {
                name: "sqlite".into(),
                status: "healthy".into(),
                detail: None,
            }],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"uptime_secs\":42"));
        assert!(!json.contains("detail"));
    }
}
