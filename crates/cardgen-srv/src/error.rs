//! Error types for cardgen-srv.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cardgen_core::CardgenError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur starting or running the server.
#[derive(Error, Debug)]
pub enum SrvError {
    /// Configuration is invalid or missing required fields.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server failed to bind or serve.
    #[error("http server error: {0}")]
    Server(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level failures, rendered as `{"error": "..."}` bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No `Authorization` header on a protected route.
    #[error("missing Authorization header")]
    MissingAuthorization,

    /// `Authorization` header present but not the configured bearer token.
    #[error("invalid token")]
    InvalidToken,

    /// Client exceeded its per-minute quota.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Caller-supplied parameters were rejected.
    #[error("{0}")]
    BadRequest(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CardgenError> for ApiError {
    fn from(err: CardgenError) -> Self {
        if err.is_input_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
