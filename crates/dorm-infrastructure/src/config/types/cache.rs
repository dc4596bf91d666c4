//! Cache configuration types
//!
//! One optional block per ORM cache role. An absent block, or a block
//! without a driver, selects the null backend.

use dorm_domain::constants::DEFAULT_CACHE_NAMESPACE;
use serde::{Deserialize, Serialize};

/// Server address of distributed cache backends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheServerConfig {
    /// Server host
    pub host: Option<String>,
    /// Server port
    pub port: Option<u16>,
}

/// Configuration of one cache role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRoleConfig {
    /// Backend driver (`array`, `apcu`, `file`, `redis`, `memcached`)
    pub driver: Option<String>,

    /// Key namespace
    pub namespace: String,

    /// Directory of the `file` backend, alias-resolved
    pub path: Option<String>,

    /// Server of the `redis` and `memcached` backends
    pub server: CacheServerConfig,

    /// Maximum entries of in-process backends
    pub max_capacity: Option<u64>,
}

impl Default for CacheRoleConfig {
    fn default() -> Self {
        Self {
            driver: None,
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            path: None,
            server: CacheServerConfig::default(),
            max_capacity: None,
        }
    }
}

impl CacheRoleConfig {
    /// Block selecting `driver`
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: Some(driver.into()),
            ..Default::default()
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the `file` backend directory
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the server address
    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.server = CacheServerConfig {
            host: Some(host.into()),
            port: Some(port),
        };
        self
    }

    /// Driver name, empty when unset
    pub fn driver_name(&self) -> &str {
        self.driver.as_deref().map_or("", str::trim)
    }
}

/// The four ORM cache roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Hydration cache
    pub hydration: Option<CacheRoleConfig>,
    /// Metadata cache
    pub metadata: Option<CacheRoleConfig>,
    /// Query cache
    pub query: Option<CacheRoleConfig>,
    /// Result cache
    pub result: Option<CacheRoleConfig>,
}

impl CacheConfig {
    /// Configured roles as (role name, block) pairs
    pub fn roles(&self) -> Vec<(&'static str, &CacheRoleConfig)> {
        [
            ("hydration", &self.hydration),
            ("metadata", &self.metadata),
            ("query", &self.query),
            ("result", &self.result),
        ]
        .into_iter()
        .filter_map(|(role, config)| config.as_ref().map(|c| (role, c)))
        .collect()
    }
}
