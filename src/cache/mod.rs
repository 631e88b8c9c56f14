//! Read-through cache port and adapters.
//!
//! The [`Cache`] trait is a plain string key/value store with a TTL. Values
//! are JSON produced by the services; keys come from [`CacheKey`].

pub mod keys;
pub mod memory;
pub mod redis;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use self::keys::CacheKey;
pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

/// Cache failures. These never reach callers of the services; the
/// read-through layer logs them and carries on without the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cache payload error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<::redis::RedisError> for CacheError {
    fn from(err: ::redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

#[async_trait]
pub trait Cache: Send + Sync {
    /// `Ok(None)` on a miss
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
