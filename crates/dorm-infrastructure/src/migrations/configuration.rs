//! Migration configuration

use crate::config::{OrganizeMigrations, TableStorageConfig};
use std::collections::BTreeMap;

/// One named migration set with resolved directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfiguration {
    name: String,
    table_storage: TableStorageConfig,
    migrations_paths: BTreeMap<String, String>,
    all_or_nothing: bool,
    check_database_platform: bool,
    transactional: bool,
    organize_migrations: OrganizeMigrations,
    connection: Option<String>,
    entity_manager: Option<String>,
}

impl MigrationConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_storage: TableStorageConfig::default(),
            migrations_paths: BTreeMap::new(),
            all_or_nothing: false,
            check_database_platform: true,
            transactional: true,
            organize_migrations: OrganizeMigrations::None,
            connection: None,
            entity_manager: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_storage(&self) -> &TableStorageConfig {
        &self.table_storage
    }

    pub fn set_table_storage(&mut self, table_storage: TableStorageConfig) {
        self.table_storage = table_storage;
    }

    /// Migration namespace to directory
    pub fn migrations_paths(&self) -> &BTreeMap<String, String> {
        &self.migrations_paths
    }

    pub fn add_migrations_directory(&mut self, namespace: impl Into<String>, dir: impl Into<String>) {
        self.migrations_paths.insert(namespace.into(), dir.into());
    }

    pub fn is_all_or_nothing(&self) -> bool {
        self.all_or_nothing
    }

    pub fn set_all_or_nothing(&mut self, all_or_nothing: bool) {
        self.all_or_nothing = all_or_nothing;
    }

    pub fn is_database_platform_checked(&self) -> bool {
        self.check_database_platform
    }

    pub fn set_check_database_platform(&mut self, check: bool) {
        self.check_database_platform = check;
    }

    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    pub fn set_transactional(&mut self, transactional: bool) {
        self.transactional = transactional;
    }

    pub fn organize_migrations(&self) -> OrganizeMigrations {
        self.organize_migrations
    }

    pub fn set_organize_migrations(&mut self, organize: OrganizeMigrations) {
        self.organize_migrations = organize;
    }

    pub fn is_organized_by_year(&self) -> bool {
        matches!(
            self.organize_migrations,
            OrganizeMigrations::Year | OrganizeMigrations::YearAndMonth
        )
    }

    pub fn is_organized_by_year_and_month(&self) -> bool {
        self.organize_migrations == OrganizeMigrations::YearAndMonth
    }

    pub fn connection(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    pub fn entity_manager(&self) -> Option<&str> {
        self.entity_manager.as_deref()
    }

    pub fn set_target(&mut self, connection: Option<String>, entity_manager: Option<String>) {
        self.connection = connection;
        self.entity_manager = entity_manager;
    }
}
