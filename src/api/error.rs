// src/api/error.rs
// Centralized error handling for HTTP API responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("INTERNAL_ERROR".to_string()),
        }
    }

    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some("BAD_REQUEST".to_string()),
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::NOT_FOUND,
            error_code: Some("NOT_FOUND".to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Storage failures: logged with the operation and the record they concern,
/// answered with a generic 500.
pub trait StoreResultExt<T> {
    fn or_internal(self, operation: &str, subject: &str) -> ApiResult<T>;
}

impl<T> StoreResultExt<T> for anyhow::Result<T> {
    fn or_internal(self, operation: &str, subject: &str) -> ApiResult<T> {
        self.map_err(|e| {
            error!(operation, subject, error = %format!("{e:#}"), "Storage call failed");
            ApiError::internal(operation)
        })
    }
}

/// Unreadable request bodies answer 400 (415 without a JSON content type).
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut error = ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()));
        if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
            error.status_code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
            error.error_code = Some("UNSUPPORTED_MEDIA_TYPE".to_string());
        }
        error
    }
}

/// Extension trait for Option<T> to create ApiError for None cases
pub trait IntoApiErrorOption<T> {
    fn ok_or_not_found(self, message: &str) -> Result<T, ApiError>;
}

impl<T> IntoApiErrorOption<T> for Option<T> {
    fn ok_or_not_found(self, message: &str) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::not_found(message))
    }
}

/// Helper function for validation errors
pub fn validation_error(field: &str, reason: &str) -> ApiError {
    ApiError::bad_request(format!("Validation failed for {field}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let error = ApiError::internal("Test error");
        assert_eq!(error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Test error");
        assert_eq!(error.error_code.as_deref(), Some("INTERNAL_ERROR"));

        let error = ApiError::not_found("User not found");
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error_message() {
        let error = validation_error("intensity", "must be between 1 and 10");
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Validation failed for intensity: must be between 1 and 10");
    }

    #[test]
    fn test_storage_failure_maps_to_internal() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("disk full"));
        let error = result.or_internal("Failed to log mood", "user-1").unwrap_err();
        assert_eq!(error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Failed to log mood");

        let ok: anyhow::Result<u8> = Ok(7);
        assert_eq!(ok.or_internal("Failed to log mood", "user-1").unwrap(), 7);
    }

    #[test]
    fn test_option_extension() {
        let missing: Option<u8> = None;
        assert_eq!(
            missing.ok_or_not_found("User not found").unwrap_err().status_code,
            StatusCode::NOT_FOUND
        );
        assert_eq!(Some(3).ok_or_not_found("x").unwrap(), 3);
    }
}
