//! Application configuration via environment variables.

use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub scim_base_url: String,
    pub scim_api_token: String,
    pub scim_timeout_secs: u64,
    pub cache_backend: String,
    pub database_url: String,
    pub service_token: String,
    pub frontend_url: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `SCIM_BASE_URL`, `SCIM_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_backend = env::var("URN_CACHE_BACKEND").unwrap_or_else(|_| "memory".into());
        if cache_backend != "memory" && cache_backend != "sqlite" {
            return Err(ConfigError::Invalid {
                key: "URN_CACHE_BACKEND".into(),
                value: cache_backend,
            });
        }

        Ok(Self {
            scim_base_url: required_env("SCIM_BASE_URL")?,
            scim_api_token: required_env("SCIM_API_TOKEN")?,
            scim_timeout_secs: env::var("SCIM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            cache_backend,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://conflux.db".into()),
            service_token: env::var("SERVICE_TOKEN").unwrap_or_default(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
        })
    }

    pub fn scim_timeout(&self) -> Duration {
        Duration::from_secs(self.scim_timeout_secs)
    }

    /// Whether `/collaborations` routes require `X-Service-Token`.
    pub fn requires_service_token(&self) -> bool {
        !self.service_token.is_empty()
    }
}

/// Configuration for testing, with every field set directly.
impl Config {
    pub fn test_default() -> Self {
        Self {
            scim_base_url: "http://localhost:8080/scim/v2".into(),
            scim_api_token: "test-scim-token".into(),
            scim_timeout_secs: 5,
            cache_backend: "memory".into(),
            database_url: "sqlite::memory:".into(),
            service_token: String::new(),
            frontend_url: "http://localhost:3000".into(),
            port: 3001,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key.into()))
}
