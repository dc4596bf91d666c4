//! Cache selector
//!
//! | Driver | Backend | Required |
//! |--------|---------|----------|
//! | unset, empty | null | |
//! | `array` | in-process | |
//! | `apcu` | process-shared in-memory | |
//! | `file` | one JSON file per key | `path` |
//! | `redis`, `memcached` | distributed | `server.host`, `server.port` |
//! | anything else | null, with a warning | |

use crate::aliases::Aliases;
use crate::config::CacheRoleConfig;
use dorm_application::ports::registry::{
    CacheProviderConfig, is_cache_provider_registered, resolve_cache_provider,
};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::cache::CacheProvider;
use dorm_providers::cache::NullCacheProvider;
use std::sync::Arc;
use tracing::{debug, warn};

const KNOWN_DRIVERS: [&str; 6] = ["null", "array", "apcu", "file", "redis", "memcached"];

/// Selects cache backends by driver name
#[derive(Debug, Clone, Default)]
pub struct CacheFactory {
    aliases: Aliases,
}

impl CacheFactory {
    pub fn new(aliases: Aliases) -> Self {
        Self { aliases }
    }

    /// Backend for `config`
    pub fn create(&self, config: &CacheRoleConfig) -> Result<Arc<dyn CacheProvider>> {
        let driver = config.driver_name();
        if driver.is_empty() {
            return Ok(Arc::new(NullCacheProvider::new()));
        }
        if !KNOWN_DRIVERS.contains(&driver) {
            warn!(driver, "Unknown cache driver, using the null cache");
            return Ok(Arc::new(NullCacheProvider::new()));
        }

        let mut provider_config =
            CacheProviderConfig::new(driver).with_namespace(config.namespace.clone());
        provider_config.max_capacity = config.max_capacity;

        match driver {
            "file" => {
                let path = config
                    .path
                    .as_deref()
                    .ok_or_else(|| Error::configuration("Not found path cache dir"))?;
                provider_config = provider_config.with_path(self.aliases.get(path)?);
            }
            "redis" | "memcached" => {
                let host = config.server.host.as_deref().ok_or_else(|| {
                    Error::configuration(format!("Not found {driver} host"))
                })?;
                let port = config.server.port.ok_or_else(|| {
                    Error::configuration(format!("Not found {driver} port"))
                })?;
                provider_config = provider_config.with_server(host, port);
            }
            _ => {}
        }

        if !is_cache_provider_registered(driver) {
            return Err(Error::configuration(format!(
                "Cache driver \"{driver}\" is not available in this build"
            )));
        }

        let provider = resolve_cache_provider(&provider_config).map_err(|e| {
            Error::configuration(format!("Failed to create \"{driver}\" cache: {e}"))
        })?;
        debug!(driver, namespace = %config.namespace, "Created cache backend");
        Ok(provider)
    }
}
