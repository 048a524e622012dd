// src/api/http/chat.rs
// Companion replies: one-off mood answers and chat sessions

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::info;

use super::common::{ApiJson, LimitQuery, require_intensity, require_text};
use crate::api::error::{ApiResult, StoreResultExt};
use crate::companion::ReplyContext;
use crate::llm::ChatMessage;
use crate::state::AppState;
use crate::store::{AiResponse, ChatRecord};

#[derive(Debug, Deserialize)]
pub struct AiResponseRequest {
    pub user_id: String,
    pub mood: String,
    pub intensity: i32,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub session_id: String,
    pub message: String,
    pub current_mood: String,
    pub mood_intensity: i32,
}

/// Prior exchanges as alternating user/assistant turns.
fn conversation_turns(records: &[ChatRecord]) -> Vec<ChatMessage> {
    records
        .iter()
        .flat_map(|r| {
            [
                ChatMessage::user(r.user_message.clone()),
                ChatMessage::assistant(r.ai_response.clone()),
            ]
        })
        .collect()
}

pub async fn ai_response_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AiResponseRequest>,
) -> ApiResult<Json<AiResponse>> {
    require_text("user_id", &request.user_id)?;
    require_text("mood", &request.mood)?;
    require_intensity("intensity", request.intensity)?;

    let resolution = state
        .resolver
        .resolve(
            &request.mood,
            request.intensity,
            request.message.as_deref(),
            ReplyContext::CheckIn,
        )
        .await;

    let response = AiResponse::new(
        request.user_id,
        request.mood,
        request.intensity,
        resolution.text,
    );
    state
        .store
        .insert_ai_response(&response)
        .await
        .or_internal("Error generating AI response", &response.user_id)?;

    info!(
        "AI response {} for user {} ({:?})",
        response.id, response.user_id, resolution.source
    );
    Ok(Json(response))
}

pub async fn get_ai_responses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<Json<Vec<AiResponse>>> {
    let limit = state
        .config
        .clamp_limit(params.limit, state.config.mood_history_limit);

    let responses = state
        .store
        .recent_ai_responses(&user_id, limit)
        .await
        .or_internal("Failed to fetch AI responses", &user_id)?;

    Ok(Json(responses))
}

pub async fn chat_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatRecord>> {
    require_text("user_id", &request.user_id)?;
    require_text("session_id", &request.session_id)?;
    require_text("message", &request.message)?;
    require_text("current_mood", &request.current_mood)?;
    require_intensity("mood_intensity", request.mood_intensity)?;

    let previous = state
        .store
        .recent_chat_records(&request.session_id, state.config.chat_context_turns)
        .await
        .or_internal("Failed to load chat context", &request.session_id)?;
    let history = conversation_turns(&previous);

    let resolution = state
        .resolver
        .resolve(
            &request.current_mood,
            request.mood_intensity,
            Some(&request.message),
            ReplyContext::Chat { history: &history },
        )
        .await;

    let record = ChatRecord::new(
        request.user_id,
        request.session_id,
        request.message,
        resolution.text,
        &request.current_mood,
        request.mood_intensity,
    );
    state
        .store
        .insert_chat_record(&record)
        .await
        .or_internal("Failed to save chat message", &record.session_id)?;

    info!(
        "Chat turn {} in session {} ({:?}, {} prior turns)",
        record.id,
        record.session_id,
        resolution.source,
        previous.len()
    );
    Ok(Json(record))
}

pub async fn get_chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<Json<Vec<ChatRecord>>> {
    let limit = state
        .config
        .clamp_limit(params.limit, state.config.chat_history_limit);

    info!("Fetching chat history: session={}, limit={}", session_id, limit);

    let messages = state
        .store
        .chat_history(&session_id, limit)
        .await
        .or_internal("Failed to fetch chat history", &session_id)?;

    Ok(Json(messages))
}
