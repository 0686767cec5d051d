//! Shared request/response DTOs.

use serde::{Deserialize, Serialize};

/// POST /collaborations/resolve request body.
#[derive(Debug, Deserialize)]
pub struct ResolveCollaborationsRequest {
    /// Role claims asserted by the identity provider. Non-group claims are ignored.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache_backend: String,
}
