// src/api/http/handlers.rs

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

/// Liveness probe at `/api/`
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "EmotionalCompanion API is running",
        "status": "healthy"
    }))
}

/// Health check handler
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.resolver.provider_name(),
        "model": state.resolver.has_provider().then(|| state.config.model.clone()),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
