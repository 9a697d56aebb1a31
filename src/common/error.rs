// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use super::validation::ValidationResult;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    RequestTimeout(String),
    /// Status propagated from a third-party site by the article fetch proxy
    Upstream { status: u16, message: String },
    InternalServer(String),
    DatabaseError(sqlx::Error),
    ValidationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::RequestTimeout(msg) => write!(f, "Request Timeout: {}", msg),
            ApiError::Upstream { status, message } => {
                write!(f, "Upstream Error ({}): {}", status, message)
            }
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, code) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "FORBIDDEN"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT"),
            ApiError::RequestTimeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg, "REQUEST_TIMEOUT"),
            ApiError::Upstream { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
                "UPSTREAM_ERROR",
            ),
            ApiError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "INTERNAL_SERVER_ERROR",
            ),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, "VALIDATION_ERROR"),
        };

        let error_response = ErrorResponse {
            message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Helper to convert a failed ValidationResult to ApiError
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            let error_messages: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            ApiError::ValidationError(error_messages.join(", "))
        }
    }
}
