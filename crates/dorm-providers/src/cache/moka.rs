//! Moka in-memory cache providers
//!
//! Two drivers share this implementation:
//!
//! - `array`: a cache owned by one cache role, dropped with it
//! - `apcu`: a process-wide store shared by every role that selects it;
//!   keys are isolated by namespace
//!
//! Each entry carries its own TTL and moka evicts it when it runs out, so
//! mixed TTLs can share one store.

use crate::constants::CACHE_DEFAULT_MAX_CAPACITY;
use dorm_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use dorm_domain::error::Result;
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use moka::Expiry;
use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedValue {
    json: Arc<str>,
    ttl: Option<Duration>,
}

/// Expires each entry after the TTL it was written with
struct EntryTtl;

impl Expiry<String, CachedValue> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    // A rewrite starts the new value's TTL over
    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

fn store(max_capacity: u64) -> Cache<String, CachedValue> {
    Cache::builder()
        .max_capacity(max_capacity)
        .expire_after(EntryTtl)
        .build()
}

static SHARED_STORE: OnceLock<Cache<String, CachedValue>> = OnceLock::new();

/// Moka-based in-memory cache provider
pub struct MokaCacheProvider {
    name: &'static str,
    cache: Cache<String, CachedValue>,
    namespace: String,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MokaCacheProvider {
    /// Create a private (`array`) cache with the given capacity
    pub fn array(namespace: impl Into<String>, max_capacity: u64) -> Self {
        Self::with_store("array", store(max_capacity), namespace.into())
    }

    /// Create a view on the process-wide (`apcu`) store
    ///
    /// The store is created on first use with `max_capacity`.
    pub fn shared(namespace: impl Into<String>, max_capacity: u64) -> Self {
        let cache = SHARED_STORE
            .get_or_init(|| store(max_capacity))
            .clone();
        Self::with_store("apcu", cache, namespace.into())
    }

    fn with_store(name: &'static str, cache: Cache<String, CachedValue>, namespace: String) -> Self {
        Self {
            name,
            cache,
            namespace,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    fn own_keys(&self) -> Vec<String> {
        self.cache
            .iter()
            .filter(|(key, _)| key.starts_with(&self.namespace))
            .map(|(key, _)| key.to_string())
            .collect()
    }
}

impl CacheProvider for MokaCacheProvider {
    fn get_json(&self, key: &str) -> Result<Option<String>> {
        let value = self.cache.get(&self.key(key));
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value.map(|v| v.json.to_string()))
    }

    fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let cached = CachedValue {
            json: Arc::from(value),
            ttl: config.ttl,
        };
        self.cache.insert(self.key(key), cached);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let key = self.key(key);
        Ok(self.cache.remove(&key).is_some())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(&self.key(key)))
    }

    fn clear(&self) -> Result<()> {
        for key in self.own_keys() {
            self.cache.invalidate(&key);
        }
        self.cache.run_pending_tasks();
        Ok(())
    }

    fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.own_keys().len() as u64,
        })
    }

    fn size(&self) -> Result<usize> {
        Ok(self.own_keys().len())
    }

    fn provider_name(&self) -> &str {
        self.name
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static ARRAY_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "array",
    description: "Moka in-process cache owned by one cache role",
    factory: |config: &CacheProviderConfig| {
        Ok(Arc::new(MokaCacheProvider::array(
            config.namespace.clone(),
            config.max_capacity.unwrap_or(CACHE_DEFAULT_MAX_CAPACITY),
        )))
    },
};

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static APCU_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "apcu",
    description: "Moka process-wide cache shared between cache roles",
    factory: |config: &CacheProviderConfig| {
        Ok(Arc::new(MokaCacheProvider::shared(
            config.namespace.clone(),
            config.max_capacity.unwrap_or(CACHE_DEFAULT_MAX_CAPACITY),
        )))
    },
};
