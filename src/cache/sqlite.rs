//! SQLite URN cache.
//!
//! Table schema (see `migrations/`):
//! - `urn` (TEXT) primary key
//! - `directory_id` (TEXT) id accepted by the directory's group endpoint
//!
//! `replace_all` runs the delete and all inserts in one transaction, so
//! other connections keep reading the previous snapshot until commit.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use super::{CacheError, UrnCache};
use crate::model::UrnCacheEntry;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct SqliteUrnCache {
    pool: SqlitePool,
}

impl SqliteUrnCache {
    /// Open (creating if needed) the database at `url` and run migrations.
    pub async fn open(url: &str) -> Result<Self, CacheError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // Every connection to `sqlite::memory:` is its own database
        let max_connections = if url.contains(":memory:") { 1 } else { 4 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn open_in_memory() -> Result<Self, CacheError> {
        Self::open("sqlite::memory:").await
    }

    /// Number of cached URNs.
    pub async fn len(&self) -> Result<usize, CacheError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM urn_cache")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}

impl UrnCache for SqliteUrnCache {
    async fn find(&self, urn: &str) -> Result<Option<String>, CacheError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT directory_id FROM urn_cache WHERE urn = ?")
                .bind(urn)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    async fn replace_all(&self, entries: &[UrnCacheEntry]) -> Result<(), CacheError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM urn_cache").execute(&mut *tx).await?;

        for entry in entries {
            sqlx::query(
                "INSERT INTO urn_cache (urn, directory_id) VALUES (?, ?)
                 ON CONFLICT(urn) DO UPDATE SET directory_id = excluded.directory_id",
            )
            .bind(&entry.urn)
            .bind(&entry.directory_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
