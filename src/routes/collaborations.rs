//! POST /collaborations/resolve

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use crate::error::AppError;
use crate::model::Collaboration;
use crate::types::ResolveCollaborationsRequest;
use crate::urn::requests_from_roles;

/// Resolve the collaborations asserted by a set of role claims.
pub async fn resolve_collaborations(
    State(state): State<Arc<crate::AppState>>,
    payload: Result<Json<ResolveCollaborationsRequest>, JsonRejection>,
) -> Result<Json<Vec<Collaboration>>, AppError> {
    let Json(body) = payload?;
    let requests = requests_from_roles(&body.roles);
    tracing::debug!(
        roles = body.roles.len(),
        collaborations = requests.len(),
        "Parsed role claims"
    );

    let collaborations = state.resolver.resolve(&requests).await?;
    Ok(Json(collaborations))
}
