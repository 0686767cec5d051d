//! Dual-mode entrypoint: Lambda or local dev server.
//!
//! Detects Lambda runtime via `AWS_LAMBDA_RUNTIME_API` env var.
//! - Lambda: `lambda_http::run(app)`, API Gateway v2 to HTTP
//! - Local: `axum::serve(listener, app)`, plain TCP server

use std::env;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use conflux::cache::AnyCache;
use conflux::cache::memory::InMemoryUrnCache;
use conflux::cache::sqlite::SqliteUrnCache;
use conflux::config::Config;
use conflux::directory::scim::ScimClient;
use conflux::resolver::CollaborationResolver;
use conflux::{AppState, create_app};

#[tokio::main]
async fn main() {
    let is_lambda = env::var("AWS_LAMBDA_RUNTIME_API").is_ok();

    // Init tracing: JSON for Lambda, pretty for local
    if is_lambda {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        // Load .env for local dev
        let _ = dotenvy::dotenv();
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = Config::from_env().expect("Failed to load configuration");

    let http_client = reqwest::Client::builder()
        .timeout(config.scim_timeout())
        .build()
        .expect("Failed to build HTTP client");
    let directory = ScimClient::from_config(http_client, &config);

    // URN cache: SQLite for deployments, in-memory for dev
    let cache = if config.cache_backend == "sqlite" {
        tracing::info!("Using SQLite URN cache ({})", config.database_url);
        AnyCache::Sqlite(
            SqliteUrnCache::open(&config.database_url)
                .await
                .expect("Failed to open URN cache database"),
        )
    } else {
        tracing::info!("Using in-memory URN cache");
        AnyCache::Memory(InMemoryUrnCache::new())
    };

    if !config.requires_service_token() {
        tracing::warn!("SERVICE_TOKEN not set; /collaborations is unauthenticated");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        resolver: Arc::new(CollaborationResolver::new(directory, cache)),
    });

    let app = create_app(state);

    if is_lambda {
        tracing::info!("Starting in Lambda mode");
        lambda_http::run(app).await.expect("Lambda runtime error");
    } else {
        let addr = format!("0.0.0.0:{}", config.port);
        tracing::info!("Starting local server on {}", addr);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind");
        axum::serve(listener, app).await.expect("Server error");
    }
}
