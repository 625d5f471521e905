//! # Centralized Error Handling
//!
//! [`AppError`] is the handler-level error type; it maps each failure class to
//! an HTTP status and renders a JSON body of the form
//! `{error, message, timestamp}`. Upstream transport failures are carried as
//! [`FetchError`](crate::upstream::FetchError) and converted via `From`.
//!
//! Validation and access-control errors fail before any network call; upstream
//! errors are retried at most once inside the upstream client; above that layer
//! errors are either converted to a safe fallback payload (depth, history) or
//! surfaced through this type. No error is fatal to the process.

use crate::upstream::FetchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid caller parameters.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Generic proxy target outside the upstream domain.
    ///
    /// **HTTP Status**: 403 Forbidden
    #[error("Forbidden target: {0}")]
    Forbidden(String),

    /// Upstream fetch failed after the client's retry policy was exhausted.
    ///
    /// **HTTP Status**: 504 on timeout, 502 otherwise
    #[error("Upstream error: {0}")]
    Upstream(#[from] FetchError),

    /// Upstream returned 2xx but the payload failed resource validation.
    ///
    /// **HTTP Status**: 502 Bad Gateway
    #[error("Invalid upstream payload: {0}")]
    InvalidShape(String),

    /// Configuration error during startup.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream(_) | AppError::InvalidShape(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable error code for the response body.
    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Forbidden(_) => "forbidden",
            AppError::Upstream(_) => "upstream_error",
            AppError::InvalidShape(_) => "invalid_upstream_payload",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => {
                tracing::debug!("Client error: {}", self);
            }
            _ => {
                tracing::error!("Upstream/server error: {}", self);
            }
        }

        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
            "timestamp": chrono::Utc::now().timestamp(),
        }));

        (status, body).into_response()
    }
}
