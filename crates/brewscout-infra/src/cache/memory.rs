//! In-memory response cache with per-entry TTL.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;

use brewscout_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-memory cache using a simple HashMap with async RwLock.
///
/// Entries live for the process lifetime unless they expire or get
/// invalidated. Expiry uses tokio's clock, so paused-time tests can move it.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Instant::now() >= entry.expires_at
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if Self::is_expired(entry) {
            drop(store);
            let mut store = self.store.write().await;
            // Re-check: a concurrent writer may have refreshed it meanwhile.
            if store.get(key).is_some_and(Self::is_expired) {
                store.remove(key);
            }
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|key, _| !key.starts_with(prefix));
        Ok(before - store.len())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.store.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("/api/coffeeshops", json!({ "a": 1 }), TTL).await.unwrap();
        assert_eq!(cache.get("/api/coffeeshops").await, Some(json!({ "a": 1 })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires() {
        let cache = InMemoryCache::new();
        cache.set("key", json!(1), Duration::from_secs(5)).await.unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(cache.get("key").await, Some(json!(1)));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("key").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_prefix_is_scoped() {
        let cache = InMemoryCache::new();
        for key in ["/api/shops?x=1", "/api/shops/42", "/api/reviews"] {
            cache.set(key, json!(key), TTL).await.unwrap();
        }

        let removed = cache.invalidate_prefix("/api/shops").await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(cache.get("/api/shops?x=1").await, None);
        assert_eq!(cache.get("/api/shops/42").await, None);
        assert_eq!(cache.get("/api/reviews").await, Some(json!("/api/reviews")));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InMemoryCache::new();
        cache.set("a", json!(1), TTL).await.unwrap();
        cache.set("b", json!(2), TTL).await.unwrap();

        cache.clear().await.unwrap();

        assert_eq!(cache.len().await, 0);
    }
}
