//! Database abstraction layer ports
//!
//! The boundary with the SQL execution engine. A [`Driver`] opens
//! [`DriverConnection`] sessions and describes its [`DatabasePlatform`];
//! [`Middleware`] decorates drivers; [`DbalType`] is a custom column type;
//! a [`SchemaManagerFactory`] builds the [`SchemaManager`] of a connection.

use crate::error::Result;
use crate::value_objects::ConnectionParams;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// SQL dialect of a database server
pub trait DatabasePlatform: Send + Sync + fmt::Debug {
    /// Platform name (e.g. "postgresql", "mysql")
    fn name(&self) -> &str;

    /// Character used to quote identifiers
    fn identifier_quote_character(&self) -> char;

    /// Quote one identifier segment, doubling embedded quote characters
    fn quote_single_identifier(&self, identifier: &str) -> String {
        let quote = self.identifier_quote_character();
        let escaped = identifier.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Quote a possibly schema-qualified identifier (`schema.table`)
    fn quote_identifier(&self, identifier: &str) -> String {
        identifier
            .split('.')
            .map(|part| self.quote_single_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Map a database column type to a registered type name
    fn register_type_mapping(&self, db_type: &str, type_name: &str);

    /// Type name mapped to a database column type
    fn type_mapping(&self, db_type: &str) -> Option<String>;

    /// True when the database column type is mapped
    fn has_type_mapping(&self, db_type: &str) -> bool {
        self.type_mapping(db_type).is_some()
    }

    /// Snapshot of every mapping
    fn type_mappings(&self) -> BTreeMap<String, String>;

    /// Query listing the databases of the server, when the platform has one
    fn list_databases_sql(&self) -> Option<String> {
        None
    }

    /// Statement creating database `name`, already quoted
    fn create_database_sql(&self, name: &str) -> String {
        format!("CREATE DATABASE {name}")
    }

    /// Statement dropping database `name`, already quoted
    fn drop_database_sql(&self, name: &str) -> String {
        format!("DROP DATABASE {name}")
    }
}

/// One open driver session
pub trait DriverConnection: Send {
    /// Execute a statement, returning the affected row count
    fn execute_statement(&mut self, sql: &str) -> Result<u64>;

    /// Run a query, returning the first column of every row as text
    fn fetch_first_column(&mut self, sql: &str) -> Result<Vec<String>>;

    /// Version reported by the server
    fn server_version(&mut self) -> Result<String>;

    /// Start a transaction
    fn begin_transaction(&mut self) -> Result<()> {
        self.execute_statement("BEGIN").map(|_| ())
    }

    /// Commit the current transaction
    fn commit(&mut self) -> Result<()> {
        self.execute_statement("COMMIT").map(|_| ())
    }

    /// Roll back the current transaction
    fn roll_back(&mut self) -> Result<()> {
        self.execute_statement("ROLLBACK").map(|_| ())
    }
}

/// Database driver
pub trait Driver: Send + Sync + fmt::Debug {
    /// Driver name
    fn name(&self) -> &str;

    /// Open a session
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn DriverConnection>>;

    /// Platform served by this driver for the given parameters
    fn database_platform(&self, params: &ConnectionParams) -> Arc<dyn DatabasePlatform>;

    /// Driver of the same kind serving `params`
    ///
    /// Drivers bound to their parameters at construction (session pools)
    /// build a new instance; decorators re-wrap the derived driver.
    fn with_params(&self, params: &ConnectionParams) -> Result<Arc<dyn Driver>>;
}

/// Driver decorator
pub trait Middleware: Send + Sync {
    /// Wrap `driver`, returning the decorated driver
    fn wrap(&self, driver: Arc<dyn Driver>) -> Arc<dyn Driver>;
}

/// Custom column type
pub trait DbalType: Send + Sync + fmt::Debug {
    /// Type name as referenced by mappings
    fn name(&self) -> &str;

    /// Column declaration on the given platform
    fn sql_declaration(&self, platform: &dyn DatabasePlatform) -> String;

    /// Convert an application value to its database representation
    fn convert_to_database_value(&self, value: &Value) -> Result<Value> {
        Ok(value.clone())
    }

    /// Convert a database value to its application representation
    fn convert_to_native_value(&self, value: &Value) -> Result<Value> {
        Ok(value.clone())
    }

    /// Whether the column needs a type comment to round-trip
    fn requires_sql_comment_hint(&self) -> bool {
        false
    }
}

/// Predicate deciding which schema assets a connection manages
pub type AssetFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Schema introspection entry point of a connection
///
/// Database-level operations run on the session they are given; `name` is
/// passed through as written, so callers quote it first.
pub trait SchemaManager: Send + Sync {
    /// Platform the schema manager targets
    fn platform(&self) -> Arc<dyn DatabasePlatform>;

    /// Keep only the asset names accepted by the connection filter
    fn filter_asset_names(&self, names: &[String]) -> Vec<String>;

    /// Databases of the server the session is connected to
    fn list_databases(&self, conn: &mut dyn DriverConnection) -> Result<Vec<String>>;

    /// Create database `name`
    fn create_database(&self, conn: &mut dyn DriverConnection, name: &str) -> Result<()>;

    /// Drop database `name`
    fn drop_database(&self, conn: &mut dyn DriverConnection, name: &str) -> Result<()>;
}

/// Creates schema managers for connections
pub trait SchemaManagerFactory: Send + Sync {
    /// Build the schema manager for a platform and asset filter
    fn create_schema_manager(
        &self,
        platform: Arc<dyn DatabasePlatform>,
        filter: Option<AssetFilter>,
    ) -> Arc<dyn SchemaManager>;
}
