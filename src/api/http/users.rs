// src/api/http/users.rs

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::info;

use super::common::{ApiJson, require_text};
use crate::api::error::{ApiResult, IntoApiErrorOption, StoreResultExt};
use crate::state::AppState;
use crate::store::User;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    require_text("email", &request.email)?;
    require_text("name", &request.name)?;

    let user = User::new(request.email.trim(), request.name.trim());
    state
        .store
        .create_user(&user)
        .await
        .or_internal("Failed to create user", &user.id)?;

    info!("Created user {}", user.id);
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = state
        .store
        .get_user(&user_id)
        .await
        .or_internal("Failed to fetch user", &user_id)?
        .ok_or_not_found("User not found")?;

    Ok(Json(user))
}
