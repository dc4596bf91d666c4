//! Migration configuration registry

use crate::manager::NamedRegistry;
use crate::migrations::MigrationConfiguration;
use dorm_domain::constants::DEFAULT_MIGRATION_CONFIGURATION;
use dorm_domain::error::{Error, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct MigrationConfigurationRegistry {
    configurations: NamedRegistry<Arc<MigrationConfiguration>>,
}

impl Default for MigrationConfigurationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationConfigurationRegistry {
    pub fn new() -> Self {
        Self {
            configurations: NamedRegistry::new("Migration configuration"),
        }
    }

    /// Register `configuration` under its name
    pub fn add(&mut self, configuration: Arc<MigrationConfiguration>) -> Result<()> {
        let name = configuration.name().to_string();
        self.configurations.add(name, configuration)
    }

    /// Configuration `name`, `"default"` when omitted
    pub fn get_configuration(&self, name: Option<&str>) -> Result<Arc<MigrationConfiguration>> {
        let name = name.unwrap_or(DEFAULT_MIGRATION_CONFIGURATION);
        self.configurations
            .find(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("configuration by name \"{name}\"")))
    }

    pub fn has_configuration(&self, name: &str) -> bool {
        self.configurations.contains(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.configurations.names()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}
