//! Cache Provider Registry
//!
//! Auto-registration system for cache backends. Backends register
//! themselves in [`CACHE_PROVIDERS`] and are discovered by driver name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dorm_domain::constants::DEFAULT_CACHE_NAMESPACE;
use dorm_domain::ports::cache::CacheProvider;

/// Configuration for cache provider creation
///
/// Contains all configuration options that a cache backend might need.
/// Backends use what they need and ignore the rest.
#[derive(Debug, Clone)]
pub struct CacheProviderConfig {
    /// Driver name (e.g., "array", "file", "redis")
    pub provider: String,
    /// Namespace prefix for keys
    pub namespace: String,
    /// Directory of the file backend
    pub path: Option<PathBuf>,
    /// Server host of distributed backends
    pub host: Option<String>,
    /// Server port of distributed backends
    pub port: Option<u16>,
    /// Maximum number of entries of in-process backends
    pub max_capacity: Option<u64>,
    /// Additional backend-specific configuration
    pub extra: HashMap<String, String>,
}

impl Default for CacheProviderConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            path: None,
            host: None,
            port: None,
            max_capacity: None,
            extra: HashMap::new(),
        }
    }
}

impl CacheProviderConfig {
    /// Create a new config with the given driver name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the file backend directory
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the server address
    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = Some(host.into());
        self.port = Some(port);
        self
    }

    /// Set the maximum capacity
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for cache providers
pub struct CacheProviderEntry {
    /// Unique driver name (e.g., "array", "redis", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&CacheProviderConfig) -> Result<Arc<dyn CacheProvider>, String>,
}

#[linkme::distributed_slice]
pub static CACHE_PROVIDERS: [CacheProviderEntry] = [..];

/// Resolve cache provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn CacheProvider>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_cache_provider(
    config: &CacheProviderConfig,
) -> Result<Arc<dyn CacheProvider>, String> {
    let provider_name = &config.provider;

    for entry in CACHE_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = CACHE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown cache provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// True when a backend is registered under `name`
pub fn is_cache_provider_registered(name: &str) -> bool {
    CACHE_PROVIDERS.iter().any(|e| e.name == name)
}

/// List all registered cache providers as (name, description) tuples
pub fn list_cache_providers() -> Vec<(&'static str, &'static str)> {
    CACHE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
