//! Memcached distributed cache provider
//!
//! Memcached has no key listing, so `clear` flushes the whole server and
//! `size` reports the server item count.

use dorm_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Memcached cache provider
pub struct MemcachedCacheProvider {
    client: memcache::Client,
    namespace: String,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemcachedCacheProvider {
    /// Connect to a Memcached server
    pub fn with_host_port(host: &str, port: u16, namespace: impl Into<String>) -> Result<Self> {
        let client = memcache::Client::connect(format!("memcache://{host}:{port}")).map_err(
            |e| Error::Cache {
                message: format!("Failed to connect to Memcached: {e}"),
            },
        )?;

        Ok(Self {
            client,
            namespace: namespace.into(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}

fn memcache_error(e: memcache::MemcacheError) -> Error {
    Error::Cache {
        message: format!("Memcached command failed: {e}"),
    }
}

impl CacheProvider for MemcachedCacheProvider {
    fn get_json(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self.client.get(&self.key(key)).map_err(memcache_error)?;
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let expiration = config
            .ttl
            .map(|ttl| u32::try_from(ttl.as_secs()).unwrap_or(u32::MAX))
            .unwrap_or(0);
        self.client
            .set(&self.key(key), value, expiration)
            .map_err(memcache_error)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        self.client.delete(&self.key(key)).map_err(memcache_error)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let value: Option<String> = self.client.get(&self.key(key)).map_err(memcache_error)?;
        Ok(value.is_some())
    }

    fn clear(&self) -> Result<()> {
        self.client.flush().map_err(memcache_error)
    }

    fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.size()? as u64,
        })
    }

    fn size(&self) -> Result<usize> {
        let servers = self.client.stats().map_err(memcache_error)?;
        Ok(servers
            .iter()
            .filter_map(|(_, stats)| stats.get("curr_items"))
            .filter_map(|items| items.parse::<usize>().ok())
            .sum())
    }

    fn provider_name(&self) -> &str {
        "memcached"
    }
}

impl std::fmt::Debug for MemcachedCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemcachedCacheProvider")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static MEMCACHED_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "memcached",
    description: "Memcached distributed cache",
    factory: |config: &CacheProviderConfig| {
        let (Some(host), Some(port)) = (config.host.as_deref(), config.port) else {
            return Err("Memcached cache requires server host and port".to_string());
        };
        let provider = MemcachedCacheProvider::with_host_port(host, port, config.namespace.clone())
            .map_err(|e| e.to_string())?;
        Ok(Arc::new(provider))
    },
};
