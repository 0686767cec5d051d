//! Application error types with Axum response mapping.
//!
//! Each variant maps to a specific HTTP status + JSON body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::resolver::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing or invalid service token")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Group directory unavailable")]
    DirectoryUnavailable(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group directory error: {0}")]
    DirectoryFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ResolveError> for AppError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::DirectoryUnavailable { reason } => AppError::DirectoryUnavailable(reason),
            ResolveError::GroupNotFound { urn } => AppError::GroupNotFound(urn),
            ResolveError::Directory(e) => AppError::DirectoryFailed(e.to_string()),
            ResolveError::Cache(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Missing or invalid service token"}),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::DirectoryUnavailable(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": "Group directory unavailable", "message": reason}),
            ),
            AppError::GroupNotFound(urn) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Group not found", "urn": urn}),
            ),
            AppError::DirectoryFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({"error": "Group directory error", "message": msg}),
            ),
            // Backend details stay in the logs
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal error"}),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(msg) = &self {
            tracing::error!("Internal error: {}", msg);
        }
        let (status, body) = self.status_and_body();
        (status, axum::Json(body)).into_response()
    }
}
