//! Conflux collaboration resolver.
//!
//! Resolves SRAM collaboration/group URNs asserted in role claims into
//! group records from the SCIM directory, backed by a URN cache.
//!
//! Same Axum router runs in both Lambda and local dev contexts.
//! Detection via `AWS_LAMBDA_RUNTIME_API` env var.

pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod middleware;
pub mod model;
pub mod ocsf;
pub mod resolver;
pub mod routes;
pub mod types;
pub mod urn;

use axum::Router;
use axum::middleware::from_fn_with_state;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::AnyCache;
use crate::config::Config;
use crate::directory::scim::ScimClient;
use crate::resolver::CollaborationResolver;

/// Resolver wired to the SCIM directory and the configured cache backend.
pub type Resolver = CollaborationResolver<ScimClient, AnyCache>;

/// Shared application state available to all route handlers.
pub struct AppState {
    pub config: Config,
    pub resolver: Arc<Resolver>,
}

/// Build the Axum router with all middleware and routes.
pub fn create_app(state: Arc<AppState>) -> Router {
    // CORS: allow single frontend origin
    let cors = match state.config.frontend_url.parse() {
        Ok(origin) => CorsLayer::new().allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!(
                "Invalid FRONTEND_URL {:?}; CORS disabled",
                state.config.frontend_url
            );
            CorsLayer::new()
        }
    }
    .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
    .allow_headers([
        axum::http::header::CONTENT_TYPE,
        axum::http::header::AUTHORIZATION,
        axum::http::HeaderName::from_static(middleware::service_token::SERVICE_TOKEN_HEADER),
    ]);

    let collaboration_routes = Router::new()
        .route(
            "/resolve",
            axum::routing::post(routes::collaborations::resolve_collaborations),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::service_token::require_service_token,
        ));

    Router::new()
        .route("/health", axum::routing::get(routes::health::health))
        .nest("/collaborations", collaboration_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
