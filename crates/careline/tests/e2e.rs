// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full-stack tests: SQLite store, HTTP intent client against a mock engine,
//! WhatsApp channel and the gateway router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use careline_config::model::IntentConfig;
use careline_core::LogLevel;
use careline_gateway::{GatewayState, build_router};
use careline_intent::RasaIntent;
use careline_test_utils::TestHarness;
use careline_whatsapp::WhatsAppChannel;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn app_for(harness: &TestHarness, engine: &MockServer) -> axum::Router {
    let intent = RasaIntent::new(&IntentConfig {
        url: format!("{}/webhooks/rest/webhook", engine.uri()),
        timeout_secs: 2,
        default_sender: "user".to_string(),
    })
    .unwrap();
    let state = GatewayState::new(
        harness.store.clone(),
        Arc::new(intent),
        Arc::new(WhatsAppChannel::new(harness.config.whatsapp.clone())),
        &harness.config,
    );
    build_router(state)
}

fn whatsapp(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/whatsapp")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn whatsapp_exchange_reaches_engine_and_is_audited() {
    let engine = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .and(body_json(json!({
            "sender": "whatsapp:+254712345678",
            "message": "view plans"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"recipient_id": "whatsapp:+254712345678", "text": "Basic & Standard plans"}
        ])))
        .expect(1)
        .mount(&engine)
        .await;

    let harness = TestHarness::builder().with_sample_data().build().await.unwrap();
    let app = app_for(&harness, &engine).await;

    let res = app
        .oneshot(whatsapp("Body=View+Plans&From=whatsapp%3A%2B254712345678"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<Message>Basic &amp; Standard plans</Message>"));

    let logs = harness.recent_logs(5).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].level, LogLevel::Info);
    assert_eq!(logs[0].phone_no.as_deref(), Some("whatsapp:+254712345678"));
    assert!(logs[0].message.contains("view plans -> Basic & Standard plans"));

    let trail = std::fs::read_to_string(harness.trail_path()).unwrap();
    assert!(trail.ends_with("whatsapp:+254712345678 - view plans - Basic & Standard plans\n"));
}

#[tokio::test]
async fn engine_outage_still_answers_the_customer() {
    let engine = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&engine)
        .await;

    let harness = TestHarness::builder().build().await.unwrap();
    let app = app_for(&harness, &engine).await;

    let res = app
        .oneshot(whatsapp("Body=hello&From=whatsapp%3A%2B254700000000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains(&harness.config.whatsapp.unavailable_text));

    let logs = harness.recent_logs(5).await.unwrap();
    assert_eq!(logs[0].level, LogLevel::Warning);
}

#[tokio::test]
async fn sample_data_is_visible_through_the_root_endpoint() {
    let engine = MockServer::start().await;
    let harness = TestHarness::builder().with_sample_data().build().await.unwrap();
    let app = app_for(&harness, &engine).await;

    let res = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["user_count"], 1);
}
