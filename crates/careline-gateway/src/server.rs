// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use careline_config::CarelineConfig;
use careline_config::model::ServerConfig;
use careline_core::{CarelineError, ChannelAdapter, DomainStore, IntentAdapter};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::trail::AuditTrail;

/// Shared state for axum request handlers. Every field is an immutable,
/// `Arc`-shared handle.
#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<dyn DomainStore>,
    pub intent: Arc<dyn IntentAdapter>,
    pub channel: Arc<dyn ChannelAdapter>,
    pub trail: Arc<AuditTrail>,
    /// Sender id used by `/chat`.
    pub default_sender: Arc<str>,
    /// Reply used on the WhatsApp webhook when the engine fails.
    pub unavailable_text: Arc<str>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    /// Assembles state from the adapters and the loaded config.
    pub fn new(
        store: Arc<dyn DomainStore>,
        intent: Arc<dyn IntentAdapter>,
        channel: Arc<dyn ChannelAdapter>,
        config: &CarelineConfig,
    ) -> Self {
        Self {
            store,
            intent,
            channel,
            trail: Arc::new(AuditTrail::new(&config.audit.trail_path)),
            default_sender: Arc::from(config.intent.default_sender.as_str()),
            unavailable_text: Arc::from(config.whatsapp.unavailable_text.as_str()),
            start_time: Instant::now(),
        }
    }
}

/// Builds the router with all routes and middleware.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/chat", post(handlers::post_chat))
        .route("/whatsapp", post(handlers::post_whatsapp))
        .route("/webhook", post(handlers::post_webhook))
        .route("/add-user", post(handlers::post_add_user))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds `host:port` and serves until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: F,
) -> Result<(), CarelineError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CarelineError::Config(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| CarelineError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
