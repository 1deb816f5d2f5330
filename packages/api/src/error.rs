// ABOUTME: API error type and its HTTP rendering
// ABOUTME: Maps validation, not-found and storage failures to one structured JSON envelope

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tickoff_storage::StorageError;
use tracing::{error, info};
use uuid::Uuid;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Validation failure for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let detail = FieldError::new(field, message);
        Self::Validation {
            message: detail.message.clone(),
            details: vec![detail],
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Convert AppError to appropriate HTTP status code and error code
    pub fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    pub fn to_user_message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => format!("Validation failed: {}", message),
            AppError::NotFound(message) => message.clone(),
            AppError::Storage(_) => "Data storage error".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound(StorageError::NotFound.to_string()),
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(_) => "Request body has invalid fields",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`"
            }
            _ => "Request body could not be read",
        };
        AppError::validation(message, vec![FieldError::new("body", rejection.body_text())])
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(
            "Query string could not be parsed",
            vec![FieldError::new("query", rejection.body_text())],
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(
            "Path parameter is invalid",
            vec![FieldError::new("path", rejection.body_text())],
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log server-side failures with full context but don't expose details
        match &self {
            AppError::Storage(err) => {
                error!(
                    request_id = %request_id,
                    storage_error = %err,
                    "Storage system error"
                );
            }
            AppError::Internal(err) => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Internal server error occurred"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let details = match self {
            AppError::Validation { details, .. } if !details.is_empty() => Some(details),
            _ => None,
        };

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: user_message,
                details,
            },
            request_id,
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_status() {
        let error = AppError::invalid_field("title", "Title is required");
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let error: AppError = StorageError::NotFound.into();
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(error.to_user_message(), "Todo not found");
    }

    #[test]
    fn test_storage_failure_maps_to_500() {
        let error: AppError = StorageError::Database("disk I/O error".to_string()).into();
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "STORAGE_ERROR");
    }

    #[test]
    fn test_user_message_sanitization() {
        let internal_error = AppError::internal(anyhow::anyhow!(
            "Database connection failed at /var/lib/secret.db"
        ));
        let message = internal_error.to_user_message();
        assert_eq!(message, "An internal server error occurred");
        assert!(!message.contains("secret"));

        let storage_error: AppError =
            StorageError::Database("table todos is locked".to_string()).into();
        assert!(!storage_error.to_user_message().contains("locked"));
    }

    #[tokio::test]
    async fn test_validation_response_body() {
        let response = AppError::invalid_field("limit", "limit must be at most 1000").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Validation failed: limit must be at most 1000"
        );
        assert_eq!(body["error"]["details"][0]["field"], "limit");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_not_found_response_has_no_details() {
        let response = AppError::not_found("Todo not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Todo not found");
        assert!(body["error"].get("details").is_none());
    }
}
