// src/api/http/common.rs
// Request validation shared by the handlers

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::api::error::{ApiError, ApiResult, validation_error};
use crate::mood::{MAX_INTENSITY, MIN_INTENSITY, is_valid_intensity};

/// `?limit=` on the history endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

/// `Json` body extractor whose rejections are [`ApiError`]s.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

pub fn require_text(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(validation_error(field, "must not be empty"));
    }
    Ok(())
}

pub fn require_intensity(field: &str, intensity: i32) -> ApiResult<()> {
    if !is_valid_intensity(intensity) {
        return Err(validation_error(
            field,
            &format!("must be between {MIN_INTENSITY} and {MAX_INTENSITY}, got {intensity}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_require_text() {
        assert!(require_text("mood", "sad").is_ok());
        let error = require_text("mood", "  ").unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert!(error.message.contains("mood"));
    }

    #[test]
    fn test_require_intensity_bounds() {
        assert!(require_intensity("intensity", 1).is_ok());
        assert!(require_intensity("intensity", 10).is_ok());
        assert!(require_intensity("intensity", 0).is_err());
        assert!(require_intensity("mood_intensity", 11).unwrap_err().message.contains("got 11"));
    }
}
