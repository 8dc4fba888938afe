use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Response cache - keyed by path plus query string, values are parsed payloads.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a live (unexpired) entry.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a value that expires after `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError>;

    /// Remove every entry whose key starts with `prefix`. Returns how many were removed.
    async fn invalidate_prefix(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Remove every entry.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache operation failed: {0}")]
    Operation(String),
}
