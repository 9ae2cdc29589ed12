//! Bearer token check for protected routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Scheme prefix expected in the `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// Reject requests whose `Authorization` header is not exactly
/// `Bearer <configured token>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::MissingAuthorization)?;

    let presented = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix(BEARER_PREFIX));

    if presented != Some(state.config.token.as_str()) {
        debug!(path = %req.uri().path(), "rejected bearer token");
        return Err(ApiError::InvalidToken);
    }

    Ok(next.run(req).await)
}
