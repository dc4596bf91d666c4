//! Main application configuration

use super::{CacheConfig, DbalConfig, LoggingConfig, MigrationConfig, OrmConfig};
use dorm_domain::constants::DEFAULT_CONNECTION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole configuration tree
///
/// ```toml
/// default_connection = "default"
///
/// [aliases]
/// "@root" = "/srv/app"
/// "@runtime" = "@root/runtime"
///
/// [[dbal]]
/// name = "default"
/// params = { driver = "memory" }
///
/// [orm.proxies]
/// path = "@runtime/proxies"
///
/// [[orm.entity_managers]]
/// name = "default"
/// connection = "default"
/// mappings = [{ driver = "attribute", dir = "@root/src/entity", namespace = "app::entity" }]
///
/// [cache.metadata]
/// driver = "array"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Name of the default connection
    pub default_connection: String,

    /// Connections
    pub dbal: Vec<DbalConfig>,

    /// Object mapper
    pub orm: OrmConfig,

    /// Migration configurations
    pub migrations: Vec<MigrationConfig>,

    /// ORM cache roles
    pub cache: CacheConfig,

    /// Path aliases (`@name` to path)
    pub aliases: BTreeMap<String, String>,

    /// Logging
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_connection: DEFAULT_CONNECTION.to_string(),
            dbal: Vec::new(),
            orm: OrmConfig::default(),
            migrations: Vec::new(),
            cache: CacheConfig::default(),
            aliases: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}
