//! Null cache provider
//!
//! A cache provider implementation that doesn't store anything. Every
//! unset cache role and every unknown driver name falls back to it.

use dorm_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use dorm_domain::error::Result;
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::Arc;

/// Null cache provider that doesn't store anything
///
/// # Example
///
/// ```rust
/// use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider};
/// use dorm_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// provider.set_json("key", "1", CacheEntryConfig::new()).unwrap();
/// assert_eq!(provider.get_json("key").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

impl CacheProvider for NullCacheProvider {
    fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::new())
    }

    fn size(&self) -> Result<usize> {
        Ok(0)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static NULL_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "null",
    description: "No-op cache that never stores anything",
    factory: |_config: &CacheProviderConfig| Ok(Arc::new(NullCacheProvider::new())),
};
