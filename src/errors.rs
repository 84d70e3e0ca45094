//! Centralized error handling.
//!
//! Every failure of the user engine, the store and the location lookup is a
//! variant of [`AppError`], which converts itself into an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // User engine
    #[error("{0}")]
    InvalidState(String),

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid email or password")]
    InvalidCredentials,

    // Request body validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Location service error: {0}")]
    Upstream(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::InvalidFormat(_) => "INVALID_FORMAT",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidState(_)
            | AppError::DuplicateEmail
            | AppError::InvalidFormat(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Upstream(msg) => {
                tracing::error!("Location service error: {}", msg);
                "The location service is unavailable".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        AppError::InvalidState(msg.into())
    }

    pub fn invalid_format(msg: impl Into<String>) -> Self {
        AppError::InvalidFormat(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
