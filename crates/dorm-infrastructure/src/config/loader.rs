//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::{
    AppConfig, CacheConfig, DbalConfig, EntityManagerConfig, LoggingConfig, MigrationConfig,
    ProxyConfig,
};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use dorm_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `DORM_LOGGING__LEVEL`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys, single underscores stay in key names
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Checks what can be checked without constructing anything. Keys only a
/// factory can judge (connection params, mapping keys, proxy path) are
/// reported when the object is built.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_dbal_config(config)?;
    validate_orm_config(config)?;
    validate_migrations_config(config)?;
    validate_cache_config(&config.cache)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_unique<'a>(
    kind: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(Error::configuration(format!("{kind} name cannot be empty")));
        }
        if !seen.insert(name) {
            return Err(Error::duplicate_name(kind, name));
        }
    }
    Ok(())
}

fn validate_dbal_config(config: &AppConfig) -> Result<()> {
    validate_unique("Connection", config.dbal.iter().map(|c| c.name.as_str()))?;
    if !config.dbal.is_empty() && !config.dbal.iter().any(|c| c.name == config.default_connection)
    {
        return Err(Error::configuration(format!(
            "Default connection \"{}\" is not configured",
            config.default_connection
        )));
    }
    Ok(())
}

fn validate_orm_config(config: &AppConfig) -> Result<()> {
    let managers = &config.orm.entity_managers;
    validate_unique("Entity manager", managers.iter().map(|m| m.name.as_str()))?;
    if !managers.is_empty()
        && !managers
            .iter()
            .any(|m| m.name == config.orm.default_entity_manager)
    {
        return Err(Error::configuration(format!(
            "Default entity manager \"{}\" is not configured",
            config.orm.default_entity_manager
        )));
    }
    Ok(())
}

fn validate_migrations_config(config: &AppConfig) -> Result<()> {
    validate_unique(
        "Migration configuration",
        config.migrations.iter().map(|m| m.name.as_str()),
    )
}

fn validate_cache_config(cache: &CacheConfig) -> Result<()> {
    for (role, block) in cache.roles() {
        let missing = match block.driver_name() {
            "file" if block.path.is_none() => Some("path cache dir"),
            "redis" | "memcached" if block.server.host.is_none() => Some("server host"),
            "redis" | "memcached" if block.server.port.is_none() => Some("server port"),
            _ => None,
        };
        if let Some(key) = missing {
            return Err(Error::configuration(format!(
                "Not found {key} for the {role} cache"
            )));
        }
    }
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> Result<()> {
    parse_log_level(&logging.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set the default connection name
    pub fn with_default_connection(mut self, name: impl Into<String>) -> Self {
        self.config.default_connection = name.into();
        self
    }

    /// Set the default entity manager name
    pub fn with_default_entity_manager(mut self, name: impl Into<String>) -> Self {
        self.config.orm.default_entity_manager = name.into();
        self
    }

    /// Add a connection
    pub fn with_connection(mut self, connection: DbalConfig) -> Self {
        self.config.dbal.push(connection);
        self
    }

    /// Add an entity manager
    pub fn with_entity_manager(mut self, manager: EntityManagerConfig) -> Self {
        self.config.orm.entity_managers.push(manager);
        self
    }

    /// Set proxy generation settings
    pub fn with_proxies(mut self, proxies: ProxyConfig) -> Self {
        self.config.orm.proxies = proxies;
        self
    }

    /// Set the proxy directory
    pub fn with_proxy_path(mut self, path: impl Into<String>) -> Self {
        self.config.orm.proxies.path = Some(path.into());
        self
    }

    /// Add a migration configuration
    pub fn with_migration(mut self, migration: MigrationConfig) -> Self {
        self.config.migrations.push(migration);
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Define a path alias
    pub fn with_alias(mut self, alias: impl Into<String>, path: impl Into<String>) -> Self {
        self.config.aliases.insert(alias.into(), path.into());
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
