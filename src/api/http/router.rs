// src/api/http/router.rs
// HTTP router composition for REST API endpoints

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::{
    chat::{ai_response_handler, chat_handler, get_ai_responses, get_chat_history},
    handlers::{health_handler, root_handler},
    mood::{get_user_moods, log_mood},
    users::{create_user, get_user},
};
use crate::state::AppState;

/// `*` allows any origin, otherwise a comma-separated list of origins.
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origin.trim() == "*" {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origin
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Main router: every endpoint lives under `/api`.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        // Health
        .route("/api", get(root_handler))
        .route("/api/", get(root_handler))
        .route("/health", get(health_handler))

        // Users
        .route("/api/users", post(create_user))
        .route("/api/users/{user_id}", get(get_user))

        // Mood log
        .route("/api/mood", post(log_mood))
        .route("/api/mood/{user_id}", get(get_user_moods))

        // Companion replies
        .route("/api/ai-response", post(ai_response_handler))
        .route("/api/ai-response/{user_id}", get(get_ai_responses))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/{session_id}", get(get_chat_history))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
