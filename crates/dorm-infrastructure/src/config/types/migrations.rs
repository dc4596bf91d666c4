//! Migration configuration types

use crate::constants::{
    MIGRATION_EXECUTED_AT_COLUMN, MIGRATION_EXECUTION_TIME_COLUMN, MIGRATION_TABLE_NAME,
    MIGRATION_VERSION_COLUMN, MIGRATION_VERSION_COLUMN_LENGTH,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bookkeeping table of executed migrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStorageConfig {
    /// Table name
    pub table_name: String,
    /// Version column
    pub version_column_name: String,
    /// Version column length
    pub version_column_length: u32,
    /// Executed-at column
    pub executed_at_column_name: String,
    /// Execution time column
    pub execution_time_column_name: String,
}

impl Default for TableStorageConfig {
    fn default() -> Self {
        Self {
            table_name: MIGRATION_TABLE_NAME.to_string(),
            version_column_name: MIGRATION_VERSION_COLUMN.to_string(),
            version_column_length: MIGRATION_VERSION_COLUMN_LENGTH,
            executed_at_column_name: MIGRATION_EXECUTED_AT_COLUMN.to_string(),
            execution_time_column_name: MIGRATION_EXECUTION_TIME_COLUMN.to_string(),
        }
    }
}

/// Directory layout of generated migrations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizeMigrations {
    /// All migrations in one directory
    #[default]
    None,
    /// One directory per year
    Year,
    /// One directory per year and month
    YearAndMonth,
}

/// Configuration of one named migration set (`[[migrations]]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Unique configuration name
    pub name: String,

    /// Bookkeeping table
    pub table_storage: TableStorageConfig,

    /// Migration namespace to directory, alias-resolved
    pub migrations_paths: BTreeMap<String, String>,

    /// Run all migrations in one transaction
    pub all_or_nothing: bool,

    /// Check the database platform before running
    pub check_database_platform: bool,

    /// Wrap each migration in a transaction
    pub transactional: bool,

    /// Directory layout of generated migrations
    pub organize_migrations: OrganizeMigrations,

    /// Target connection, exclusive with `em`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    /// Target entity manager, exclusive with `connection`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub em: Option<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            name: dorm_domain::constants::DEFAULT_MIGRATION_CONFIGURATION.to_string(),
            table_storage: TableStorageConfig::default(),
            migrations_paths: BTreeMap::new(),
            all_or_nothing: false,
            check_database_platform: true,
            transactional: true,
            organize_migrations: OrganizeMigrations::None,
            connection: None,
            em: None,
        }
    }
}

impl MigrationConfig {
    /// Configuration `name` with defaults
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a migrations directory for `namespace`
    pub fn with_path(mut self, namespace: impl Into<String>, dir: impl Into<String>) -> Self {
        self.migrations_paths.insert(namespace.into(), dir.into());
        self
    }

    /// Target `connection`
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Target entity manager `em`
    pub fn with_entity_manager(mut self, em: impl Into<String>) -> Self {
        self.em = Some(em.into());
        self
    }
}
