//! GET /health

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::types::HealthResponse;

/// Health check: status plus the URN cache backend in use.
pub async fn health(State(state): State<Arc<crate::AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        cache_backend: state.resolver.cache().backend_name().into(),
    })
}
