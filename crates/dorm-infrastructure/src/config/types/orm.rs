//! Object mapper configuration types

use super::events::EventsConfig;
use dorm_domain::constants::{DEFAULT_ENTITY_MANAGER, DEFAULT_PROXY_NAMESPACE};
use dorm_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Lazy proxy generation settings (`[orm.proxies]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Generation directory, mandatory for every entity manager
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Namespace of generated proxies
    pub namespace: String,

    /// Generate proxies on demand
    pub auto_generate: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: DEFAULT_PROXY_NAMESPACE.to_string(),
            auto_generate: true,
        }
    }
}

/// One metadata mapping of an entity manager
///
/// `driver`, `dir` and `namespace` are mandatory; they are optional here so
/// a missing key surfaces as a configuration error naming it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Mapping name, informational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Mapping kind: `attribute`, `php`, `static_php` or `xml`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,

    /// Mapping directory, alias-resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Class namespace served by this mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Mapping file extension of file based kinds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
}

impl MappingConfig {
    /// Mapping of `driver` kind for classes in `namespace` under `dir`
    pub fn new(
        driver: impl Into<String>,
        dir: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            driver: Some(driver.into()),
            dir: Some(dir.into()),
            namespace: Some(namespace.into()),
            file_extension: None,
        }
    }

    /// Set the file extension
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = Some(extension.into());
        self
    }
}

/// Custom DQL functions by kind, name to component name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DqlConfig {
    /// Date and time functions
    pub custom_datetime_functions: BTreeMap<String, String>,
    /// Numeric functions
    pub custom_numeric_functions: BTreeMap<String, String>,
    /// String functions
    pub custom_string_functions: BTreeMap<String, String>,
}

/// Configuration of one named entity manager (`[[orm.entity_managers]]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityManagerConfig {
    /// Unique entity manager name
    pub name: String,

    /// Connection name; required, an entity manager without one is rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    /// Metadata mappings
    pub mappings: Vec<MappingConfig>,

    /// Naming strategy component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naming_strategy: Option<String>,

    /// Quote strategy component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_strategy: Option<String>,

    /// Entity listener resolver component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_listener_resolver: Option<String>,

    /// Typed field mapper component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typed_field_mapper: Option<String>,

    /// Repository factory component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_factory: Option<String>,

    /// Custom DQL functions
    pub dql: DqlConfig,

    /// Hydration mode name to component name
    pub custom_hydration_modes: BTreeMap<String, String>,

    /// Filter name to component name
    pub filters: BTreeMap<String, String>,

    /// Classes ignored by schema tooling
    pub schema_ignore_classes: Vec<String>,

    /// Batch size of sub-select eager fetches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_mode_sub_select_batch_size: Option<usize>,

    /// Query hints applied to every query
    pub default_query_hints: BTreeMap<String, Value>,

    /// Platform name to identity generation strategy
    pub identity_generation_preferences: BTreeMap<String, String>,

    /// Entity manager event bundle
    pub events: EventsConfig,
}

impl EntityManagerConfig {
    /// Entity manager `name` on `connection`
    pub fn new(name: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection: Some(connection.into()),
            ..Default::default()
        }
    }

    /// Name of the connection this manager runs on
    pub fn connection_name(&self) -> Result<&str> {
        self.connection.as_deref().ok_or_else(|| {
            Error::configuration(format!(
                "Not found param \"connection\" on entity manager \"{}\"",
                self.name
            ))
        })
    }

    /// Add a mapping
    pub fn with_mapping(mut self, mapping: MappingConfig) -> Self {
        self.mappings.push(mapping);
        self
    }

    /// Set the naming strategy component
    pub fn with_naming_strategy(mut self, component: impl Into<String>) -> Self {
        self.naming_strategy = Some(component.into());
        self
    }

    /// Add a filter
    pub fn with_filter(mut self, name: impl Into<String>, component: impl Into<String>) -> Self {
        self.filters.insert(name.into(), component.into());
        self
    }

    /// Set the event bundle
    pub fn with_events(mut self, events: EventsConfig) -> Self {
        self.events = events;
        self
    }
}

/// Object mapper configuration (`[orm]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    /// Name of the default entity manager
    pub default_entity_manager: String,

    /// Proxy generation settings shared by every entity manager
    pub proxies: ProxyConfig,

    /// Entity managers
    pub entity_managers: Vec<EntityManagerConfig>,
}

impl Default for OrmConfig {
    fn default() -> Self {
        Self {
            default_entity_manager: DEFAULT_ENTITY_MANAGER.to_string(),
            proxies: ProxyConfig::default(),
            entity_managers: Vec::new(),
        }
    }
}
