//! Redis distributed cache provider
//!
//! Suitable for multi-instance deployments. Keys are prefixed with the
//! cache namespace, so several roles can share one Redis database.
//!
//! ## Example
//!
//! ```ignore
//! use dorm_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::with_host_port("localhost", 6379, "doctrine_")?;
//! ```

use dorm_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use redis::{Client, Connection};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Redis cache provider
pub struct RedisCacheProvider {
    client: Client,
    namespace: String,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider with connection string
    ///
    /// The client connects lazily on the first cache operation.
    pub fn new(connection_string: &str, namespace: impl Into<String>) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| Error::Cache {
            message: format!("Failed to create Redis client: {e}"),
        })?;

        Ok(Self {
            client,
            namespace: namespace.into(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Create a new Redis cache provider with host and port
    pub fn with_host_port(host: &str, port: u16, namespace: impl Into<String>) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"), namespace)
    }

    fn connection(&self) -> Result<Connection> {
        self.client.get_connection().map_err(|e| Error::Cache {
            message: format!("Failed to get Redis connection: {e}"),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    fn own_keys(&self, conn: &mut Connection) -> Result<Vec<String>> {
        redis::cmd("KEYS")
            .arg(format!("{}*", self.namespace))
            .query(conn)
            .map_err(redis_error)
    }
}

fn redis_error(e: redis::RedisError) -> Error {
    Error::Cache {
        message: format!("Redis command failed: {e}"),
    }
}

impl CacheProvider for RedisCacheProvider {
    fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection()?;
        let value: Option<String> = redis::cmd("GET")
            .arg(self.key(key))
            .query(&mut conn)
            .map_err(redis_error)?;

        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.connection()?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(self.key(key)).arg(value);
        if let Some(ttl) = config.ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }
        cmd.query::<()>(&mut conn).map_err(redis_error)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection()?;
        let removed: i64 = redis::cmd("DEL")
            .arg(self.key(key))
            .query(&mut conn)
            .map_err(redis_error)?;
        Ok(removed > 0)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection()?;
        redis::cmd("EXISTS")
            .arg(self.key(key))
            .query(&mut conn)
            .map_err(redis_error)
    }

    fn clear(&self) -> Result<()> {
        let mut conn = self.connection()?;
        let keys = self.own_keys(&mut conn)?;
        if keys.is_empty() {
            return Ok(());
        }
        redis::cmd("DEL")
            .arg(keys)
            .query::<()>(&mut conn)
            .map_err(redis_error)
    }

    fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.size()? as u64,
        })
    }

    fn size(&self) -> Result<usize> {
        let mut conn = self.connection()?;
        Ok(self.own_keys(&mut conn)?.len())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static REDIS_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "redis",
    description: "Redis distributed cache",
    factory: |config: &CacheProviderConfig| {
        let (Some(host), Some(port)) = (config.host.as_deref(), config.port) else {
            return Err("Redis cache requires server host and port".to_string());
        };
        let provider = RedisCacheProvider::with_host_port(host, port, config.namespace.clone())
            .map_err(|e| e.to_string())?;
        Ok(Arc::new(provider))
    },
};
