//! Application error handling
//!
//! Every failure leaves the API as `{"success": false, "error": "..."}`.
//! Services return `ApiError`; the `IntoResponse` impl below is the single
//! place where error kinds become status codes.

use crate::repositories::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use exercisedb_shared::{AuthError, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// Message returned for every 500; causes are logged, never sent
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(field) => {
                ApiError::Conflict(format!("A record with this {} already exists", field))
            }
            RepositoryError::Database(e) => ApiError::Database(e),
            RepositoryError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCode | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::MalformedSecret | AuthError::ClockUnavailable => {
                ApiError::Internal(anyhow::Error::new(err))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg) => msg.clone(),
            ApiError::Internal(err) => {
                error!(error = ?err, "Internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::Database(err) => {
                error!(error = ?err, "Database error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
