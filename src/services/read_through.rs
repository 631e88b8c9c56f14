use crate::cache::{Cache, CacheError, CacheKey};
use crate::config::CacheConfig;
use crate::error::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Read-through cache in front of a loader.
///
/// Cache failures of any kind (backend errors, timeouts, undecodable
/// payloads) are logged and otherwise ignored: a failed read is a miss and a
/// failed write leaves the computed value to be returned as usual. Only the
/// loader's own error can fail the call.
#[derive(Clone)]
pub struct ReadThrough {
    cache: Option<Arc<dyn Cache>>,
    ttl: Duration,
    op_timeout: Duration,
}

impl ReadThrough {
    /// A zero TTL disables the cache
    pub fn new(cache: Option<Arc<dyn Cache>>, ttl: Duration, op_timeout: Duration) -> Self {
        let cache = cache.filter(|_| !ttl.is_zero());
        Self {
            cache,
            ttl,
            op_timeout,
        }
    }

    pub fn from_config(cache: Option<Arc<dyn Cache>>, config: &CacheConfig) -> Self {
        Self::new(cache, config.ttl(), config.timeout())
    }

    /// Pass-through: every call runs the loader
    pub fn disabled() -> Self {
        let defaults = CacheConfig::default();
        Self {
            cache: None,
            ttl: defaults.ttl(),
            op_timeout: defaults.timeout(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub async fn get_or_load<T, F, Fut>(&self, key: CacheKey<'_>, load: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
    {
        let Some(cache) = &self.cache else {
            return load().await;
        };
        let key = key.render();

        match self.read::<T>(cache.as_ref(), &key).await {
            Ok(Some(value)) => {
                debug!(key = %key, "cache hit");
                return Ok(value);
            }
            Ok(None) => debug!(key = %key, "cache miss"),
            Err(e) => warn!(key = %key, error = %e, "cache read failed, loading from database"),
        }

        let value = load().await?;

        if let Err(e) = self.write(cache.as_ref(), &key, &value).await {
            warn!(key = %key, error = %e, "cache write failed");
        }
        Ok(value)
    }

    async fn read<T: DeserializeOwned>(
        &self,
        cache: &dyn Cache,
        key: &str,
    ) -> Result<Option<T>, CacheError> {
        let raw = timeout(self.op_timeout, cache.get(key))
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))??;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(
        &self,
        cache: &dyn Cache,
        key: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        timeout(self.op_timeout, cache.set(key, &payload, self.ttl))
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
    }
}
