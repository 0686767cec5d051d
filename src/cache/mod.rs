//! URN -> directory id cache.
//!
//! Provides the `UrnCache` trait for pluggable storage, an in-memory
//! backend for development/testing, and a SQLite backend for deployments.
//!
//! The cache is only ever rebuilt wholesale: `replace_all` must swap the
//! entire contents atomically so a concurrent `find` sees either the old
//! snapshot or the new one, never a mix or an empty table.

pub mod memory;
pub mod sqlite;

use crate::model::UrnCacheEntry;

/// Pluggable URN cache backend.
pub trait UrnCache: Send + Sync {
    /// Directory id cached for `urn`, if any.
    fn find(
        &self,
        urn: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, CacheError>> + Send;

    /// Replace the whole cache with `entries`.
    fn replace_all(
        &self,
        entries: &[UrnCacheEntry],
    ) -> impl std::future::Future<Output = Result<(), CacheError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("URN cache backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for CacheError {
    fn from(value: sqlx::Error) -> Self {
        Self::Backend(value.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for CacheError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::Backend(value.to_string())
    }
}

/// Type-erased cache backend supporting both in-memory and SQLite.
///
/// `UrnCache` uses RPITIT and is not object-safe, so this enum
/// dispatches manually instead.
pub enum AnyCache {
    Memory(memory::InMemoryUrnCache),
    Sqlite(sqlite::SqliteUrnCache),
}

impl AnyCache {
    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyCache::Memory(_) => "memory",
            AnyCache::Sqlite(_) => "sqlite",
        }
    }
}

impl UrnCache for AnyCache {
    async fn find(&self, urn: &str) -> Result<Option<String>, CacheError> {
        match self {
            AnyCache::Memory(c) => c.find(urn).await,
            AnyCache::Sqlite(c) => c.find(urn).await,
        }
    }

    async fn replace_all(&self, entries: &[UrnCacheEntry]) -> Result<(), CacheError> {
        match self {
            AnyCache::Memory(c) => c.replace_all(entries).await,
            AnyCache::Sqlite(c) => c.replace_all(entries).await,
        }
    }
}
