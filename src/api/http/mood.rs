// src/api/http/mood.rs

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::info;

use super::common::{ApiJson, LimitQuery, require_intensity, require_text};
use crate::api::error::{ApiResult, StoreResultExt};
use crate::state::AppState;
use crate::store::MoodEntry;

#[derive(Debug, Deserialize)]
pub struct LogMoodRequest {
    pub user_id: String,
    pub mood: String,
    pub intensity: i32,
}

pub async fn log_mood(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LogMoodRequest>,
) -> ApiResult<Json<MoodEntry>> {
    require_text("user_id", &request.user_id)?;
    require_text("mood", &request.mood)?;
    require_intensity("intensity", request.intensity)?;

    let entry = MoodEntry::new(request.user_id, request.mood, request.intensity);
    state
        .store
        .insert_mood_entry(&entry)
        .await
        .or_internal("Failed to log mood", &entry.user_id)?;

    info!("Logged mood {}-{} for user {}", entry.mood, entry.intensity, entry.user_id);
    Ok(Json(entry))
}

pub async fn get_user_moods(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<Json<Vec<MoodEntry>>> {
    let limit = state
        .config
        .clamp_limit(params.limit, state.config.mood_history_limit);

    let entries = state
        .store
        .recent_mood_entries(&user_id, limit)
        .await
        .or_internal("Failed to fetch mood entries", &user_id)?;

    Ok(Json(entries))
}
