//! Connection configuration types

use super::events::EventsConfig;
use dorm_domain::value_objects::ConnectionParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration of one named connection (`[[dbal]]`)
///
/// ```toml
/// [[dbal]]
/// name = "default"
/// auto_commit = true
/// middlewares = ["dbal.middleware.logging"]
/// schema_assets_filter = "^app_"
///
/// [dbal.params]
/// driver = "pdo_pgsql"
/// host = "localhost"
/// dbname = "app"
///
/// [dbal.custom_types]
/// uuid = "dbal.type.uuid"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbalConfig {
    /// Unique connection name
    pub name: String,

    /// Driver parameters, mandatory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ConnectionParams>,

    /// Custom type name to component name
    pub custom_types: BTreeMap<String, String>,

    /// Database type to type name
    pub mapping_types: BTreeMap<String, String>,

    /// Auto-commit mode, on when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_commit: Option<bool>,

    /// Middleware component names, applied in order
    pub middlewares: Vec<String>,

    /// Regular expression selecting the schema assets to manage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_assets_filter: Option<String>,

    /// Disable type comments, applied only when true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_type_comments: Option<bool>,

    /// Schema manager factory component name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_manager_factory: Option<String>,

    /// Connection event bundle
    pub events: EventsConfig,
}

impl DbalConfig {
    /// Connection `name` with `params`
    pub fn new(name: impl Into<String>, params: ConnectionParams) -> Self {
        Self {
            name: name.into(),
            params: Some(params),
            ..Default::default()
        }
    }

    /// Register a custom type resolved from `component`
    pub fn with_custom_type(mut self, name: impl Into<String>, component: impl Into<String>) -> Self {
        self.custom_types.insert(name.into(), component.into());
        self
    }

    /// Map a database type to a type name
    pub fn with_mapping_type(
        mut self,
        db_type: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.mapping_types.insert(db_type.into(), type_name.into());
        self
    }

    /// Set auto-commit mode
    pub fn with_auto_commit(mut self, auto_commit: bool) -> Self {
        self.auto_commit = Some(auto_commit);
        self
    }

    /// Append a middleware component
    pub fn with_middleware(mut self, component: impl Into<String>) -> Self {
        self.middlewares.push(component.into());
        self
    }

    /// Set the schema assets filter
    pub fn with_schema_assets_filter(mut self, pattern: impl Into<String>) -> Self {
        self.schema_assets_filter = Some(pattern.into());
        self
    }

    /// Set the schema manager factory component
    pub fn with_schema_manager_factory(mut self, component: impl Into<String>) -> Self {
        self.schema_manager_factory = Some(component.into());
        self
    }

    /// Set the event bundle
    pub fn with_events(mut self, events: EventsConfig) -> Self {
        self.events = events;
        self
    }
}
