//! Database platforms
//!
//! A [`GenericPlatform`] carries the dialect name, the identifier quote
//! character and the database-type to type-name mapping table. Mappings are
//! seeded with the common column types and extended by connection
//! configuration (`mapping_types`, custom types).

use dorm_domain::ports::dbal::DatabasePlatform;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

const BASE_MAPPINGS: &[(&str, &str)] = &[
    ("bigint", "bigint"),
    ("boolean", "boolean"),
    ("char", "string"),
    ("date", "date"),
    ("decimal", "decimal"),
    ("double precision", "float"),
    ("float", "float"),
    ("int", "integer"),
    ("integer", "integer"),
    ("json", "json"),
    ("numeric", "decimal"),
    ("smallint", "smallint"),
    ("text", "text"),
    ("time", "time"),
    ("timestamp", "datetime"),
    ("varchar", "string"),
];

const POSTGRESQL_MAPPINGS: &[(&str, &str)] = &[
    ("bool", "boolean"),
    ("bytea", "blob"),
    ("int4", "integer"),
    ("int8", "bigint"),
    ("jsonb", "json"),
    ("timestamptz", "datetimetz"),
    ("uuid", "guid"),
];

const MYSQL_MAPPINGS: &[(&str, &str)] = &[
    ("datetime", "datetime"),
    ("longtext", "text"),
    ("mediumint", "integer"),
    ("tinyint", "boolean"),
    ("blob", "blob"),
];

const SQLITE_MAPPINGS: &[(&str, &str)] = &[
    ("blob", "blob"),
    ("datetime", "datetime"),
    ("real", "float"),
];

/// Database platform defined by a name, a quote character and type mappings
#[derive(Debug)]
pub struct GenericPlatform {
    name: String,
    quote: char,
    mappings: RwLock<BTreeMap<String, String>>,
}

impl GenericPlatform {
    /// Create a platform seeded with the base type mappings
    pub fn new(name: impl Into<String>, quote: char) -> Self {
        Self::with_mappings(name, quote, &[])
    }

    fn with_mappings(name: impl Into<String>, quote: char, extra: &[(&str, &str)]) -> Self {
        let mappings = BASE_MAPPINGS
            .iter()
            .chain(extra)
            .map(|(db_type, type_name)| ((*db_type).to_string(), (*type_name).to_string()))
            .collect();

        Self {
            name: name.into(),
            quote,
            mappings: RwLock::new(mappings),
        }
    }

    /// PostgreSQL dialect
    pub fn postgresql() -> Self {
        Self::with_mappings("postgresql", '"', POSTGRESQL_MAPPINGS)
    }

    /// MySQL dialect
    pub fn mysql() -> Self {
        Self::with_mappings("mysql", '`', MYSQL_MAPPINGS)
    }

    /// SQLite dialect
    pub fn sqlite() -> Self {
        Self::with_mappings("sqlite", '"', SQLITE_MAPPINGS)
    }

    /// Platform by dialect name, accepting the usual driver spellings
    pub fn for_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pgsql" | "pdo_pgsql" => Self::postgresql(),
            "mysql" | "mariadb" | "pdo_mysql" | "mysqli" => Self::mysql(),
            "sqlite" | "sqlite3" | "pdo_sqlite" => Self::sqlite(),
            other => Self::new(other, '"'),
        }
    }
}

impl DatabasePlatform for GenericPlatform {
    fn name(&self) -> &str {
        &self.name
    }

    fn identifier_quote_character(&self) -> char {
        self.quote
    }

    fn register_type_mapping(&self, db_type: &str, type_name: &str) {
        self.mappings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(db_type.to_ascii_lowercase(), type_name.to_string());
    }

    fn type_mapping(&self, db_type: &str) -> Option<String> {
        self.mappings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&db_type.to_ascii_lowercase())
            .cloned()
    }

    fn type_mappings(&self) -> BTreeMap<String, String> {
        self.mappings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn list_databases_sql(&self) -> Option<String> {
        match self.name.as_str() {
            "postgresql" => Some("SELECT datname FROM pg_database".to_string()),
            "mysql" => Some("SHOW DATABASES".to_string()),
            _ => None,
        }
    }
}
