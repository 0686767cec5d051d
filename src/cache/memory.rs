//! In-memory URN cache for development and testing.
//!
//! Contents are lost on restart and not shared across processes.

use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{CacheError, UrnCache};
use crate::model::UrnCacheEntry;

#[derive(Default)]
pub struct InMemoryUrnCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryUrnCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached URNs.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl UrnCache for InMemoryUrnCache {
    async fn find(&self, urn: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().await.get(urn).cloned())
    }

    async fn replace_all(&self, entries: &[UrnCacheEntry]) -> Result<(), CacheError> {
        // Build outside the lock, swap under it
        let fresh: HashMap<String, String> = entries
            .iter()
            .map(|e| (e.urn.clone(), e.directory_id.clone()))
            .collect();

        *self.entries.write().await = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(urn: &str, id: &str) -> UrnCacheEntry {
        UrnCacheEntry {
            urn: urn.into(),
            directory_id: id.into(),
        }
    }

    #[tokio::test]
    async fn test_find_missing() {
        let cache = InMemoryUrnCache::new();
        assert!(cache.find("urn:a").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_replace_and_find() {
        let cache = InMemoryUrnCache::new();
        cache
            .replace_all(&[entry("urn:a", "1"), entry("urn:b", "2")])
            .await
            .unwrap();

        assert_eq!(cache.find("urn:a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(cache.find("urn:b").await.unwrap().as_deref(), Some("2"));
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_replace_drops_stale_entries() {
        let cache = InMemoryUrnCache::new();
        cache
            .replace_all(&[entry("urn:a", "1"), entry("urn:b", "2")])
            .await
            .unwrap();
        cache.replace_all(&[entry("urn:c", "3")]).await.unwrap();

        assert!(cache.find("urn:a").await.unwrap().is_none());
        assert!(cache.find("urn:b").await.unwrap().is_none());
        assert_eq!(cache.find("urn:c").await.unwrap().as_deref(), Some("3"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_replace_with_nothing_empties_cache() {
        let cache = InMemoryUrnCache::new();
        cache.replace_all(&[entry("urn:a", "1")]).await.unwrap();
        cache.replace_all(&[]).await.unwrap();
        assert!(cache.is_empty().await);
    }
}
