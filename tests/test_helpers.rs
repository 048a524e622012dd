// tests/test_helpers.rs
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use companion::{
    AppState, CompanionConfig,
    api::create_router,
    companion::{CompanionTables, ResponseResolver},
    llm::LlmProvider,
    store::{CompanionStore, db},
};

/// Build a minimal AppState for integration tests.
/// Uses in-memory SQLite and the built-in response tables.
pub async fn create_test_app_state(provider: Option<Arc<dyn LlmProvider>>) -> AppState {
    let config = CompanionConfig::default();
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("create in-memory sqlite");

    let resolver = ResponseResolver::new(Arc::new(CompanionTables::builtin()), provider)
        .with_limits(config.generation_limits());

    AppState::new(CompanionStore::new(pool), Arc::new(resolver), Arc::new(config))
}

pub async fn create_test_router(provider: Option<Arc<dyn LlmProvider>>) -> (Router, AppState) {
    let state = create_test_app_state(provider).await;
    (create_router(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
