//! Migration configuration factory

use crate::aliases::Aliases;
use crate::config::MigrationConfig;
use crate::migrations::{MigrationConfiguration, MigrationConfigurationRegistry};
use dorm_domain::error::Result;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MigrationConfigurationFactory {
    aliases: Aliases,
}

impl MigrationConfigurationFactory {
    pub fn new(aliases: Aliases) -> Self {
        Self { aliases }
    }

    /// Configuration for one block, with alias-resolved directories
    pub fn create(&self, config: &MigrationConfig) -> Result<MigrationConfiguration> {
        let mut configuration = MigrationConfiguration::new(config.name.clone());
        for (namespace, dir) in self.aliases.resolve_all(&config.migrations_paths)? {
            configuration.add_migrations_directory(namespace, dir);
        }
        configuration.set_table_storage(config.table_storage.clone());
        configuration.set_all_or_nothing(config.all_or_nothing);
        configuration.set_check_database_platform(config.check_database_platform);
        configuration.set_transactional(config.transactional);
        configuration.set_organize_migrations(config.organize_migrations);
        configuration.set_target(config.connection.clone(), config.em.clone());

        debug!(configuration = %config.name, "Created migration configuration");
        Ok(configuration)
    }

    /// Registry of every block
    pub fn create_all(&self, configs: &[MigrationConfig]) -> Result<MigrationConfigurationRegistry> {
        let mut registry = MigrationConfigurationRegistry::new();
        for config in configs {
            registry.add(Arc::new(self.create(config)?))?;
        }
        Ok(registry)
    }
}
