//! Cache Provider Port
//!
//! Port for cache backend providers. Each of the four ORM cache roles
//! (hydration, metadata, query, result) holds one provider selected by
//! driver name: in-process (`array`, `apcu`), `file`, distributed (`redis`,
//! `memcached`) or the null provider that never stores anything.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache Entry Configuration
///
/// Configures how a cache entry should be stored. Entries without a TTL
/// live until evicted or cleared.
///
/// # Example
///
/// ```
/// use dorm_domain::ports::cache::CacheEntryConfig;
/// use std::time::Duration;
///
/// let config = CacheEntryConfig::new().with_ttl(Duration::from_secs(600));
/// assert_eq!(config.ttl, Some(Duration::from_secs(600)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live for the cache entry
    pub ttl: Option<Duration>,
}

impl CacheEntryConfig {
    /// Create an entry config without expiry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Some(Duration::from_secs(secs));
        self
    }
}

/// Cache Operation Statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of cache entries
    pub entries: u64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Cache Provider Port
///
/// JSON-based storage; keys are namespaced by the provider, callers pass
/// plain keys.
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get a value from the cache as JSON string
    ///
    /// Returns `None` when the key is absent or expired.
    fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Set a value in the cache from JSON string
    fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()>;

    /// Delete a value, returning whether it existed
    fn delete(&self, key: &str) -> Result<bool>;

    /// Check if a key exists and hasn't expired
    fn exists(&self, key: &str) -> Result<bool>;

    /// Clear all values from the cache
    fn clear(&self) -> Result<()>;

    /// Get cache statistics
    fn stats(&self) -> Result<CacheStats>;

    /// Get the cache size (number of entries)
    fn size(&self) -> Result<usize>;

    /// Name of the backend (e.g. "array", "redis", "null")
    fn provider_name(&self) -> &str;
}

/// Typed helpers over [`CacheProvider`]
pub trait CacheProviderExt: CacheProvider {
    /// Get and deserialize a cached value
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_json(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value
    fn set<T: Serialize>(&self, key: &str, value: &T, config: CacheEntryConfig) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set_json(key, &json, config)
    }
}

impl<C: CacheProvider + ?Sized> CacheProviderExt for C {}
