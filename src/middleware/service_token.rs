//! Service token check: require `X-Service-Token` when one is configured.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::AppError;

pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";

/// Axum middleware rejecting requests without the configured service token.
pub async fn require_service_token(
    State(state): State<Arc<crate::AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let expected = &state.config.service_token;
    if expected.is_empty() {
        return Ok(next.run(req).await);
    }

    let presented = req
        .headers()
        .get(SERVICE_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        tracing::warn!("Rejected request with missing or invalid service token");
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(req).await)
}
