//! Type registry
//!
//! Shared by every connection of the process. Registration is append-only:
//! adding a name that is already registered keeps the first type.

use dorm_domain::error::{Error, Result};
use dorm_domain::ports::dbal::{DatabasePlatform, DbalType};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Built-in column type with a fixed declaration
#[derive(Debug, Clone, Copy)]
struct BuiltinType {
    name: &'static str,
    declaration: &'static str,
}

impl DbalType for BuiltinType {
    fn name(&self) -> &str {
        self.name
    }

    fn sql_declaration(&self, _platform: &dyn DatabasePlatform) -> String {
        self.declaration.to_string()
    }
}

const BUILTIN_TYPES: &[BuiltinType] = &[
    BuiltinType { name: "bigint", declaration: "BIGINT" },
    BuiltinType { name: "blob", declaration: "BLOB" },
    BuiltinType { name: "boolean", declaration: "BOOLEAN" },
    BuiltinType { name: "date", declaration: "DATE" },
    BuiltinType { name: "datetime", declaration: "TIMESTAMP" },
    BuiltinType { name: "datetimetz", declaration: "TIMESTAMP WITH TIME ZONE" },
    BuiltinType { name: "decimal", declaration: "NUMERIC" },
    BuiltinType { name: "float", declaration: "DOUBLE PRECISION" },
    BuiltinType { name: "guid", declaration: "CHAR(36)" },
    BuiltinType { name: "integer", declaration: "INTEGER" },
    BuiltinType { name: "json", declaration: "JSON" },
    BuiltinType { name: "smallint", declaration: "SMALLINT" },
    BuiltinType { name: "string", declaration: "VARCHAR(255)" },
    BuiltinType { name: "text", declaration: "TEXT" },
    BuiltinType { name: "time", declaration: "TIME" },
];

/// Registry of column types by name
pub struct TypeRegistry {
    types: RwLock<BTreeMap<String, Arc<dyn DbalType>>>,
}

impl TypeRegistry {
    /// Registry seeded with the built-in types
    pub fn new() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|ty| (ty.name.to_string(), Arc::new(*ty) as Arc<dyn DbalType>))
            .collect();
        Self {
            types: RwLock::new(types),
        }
    }

    /// True when `name` is registered
    pub fn has_type(&self, name: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Register `ty` under `name`; returns false and keeps the existing
    /// type when the name is taken
    pub fn add_type(&self, name: &str, ty: Arc<dyn DbalType>) -> bool {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if types.contains_key(name) {
            return false;
        }
        debug!(type_name = name, "Registered custom type");
        types.insert(name.to_string(), ty);
        true
    }

    /// Type registered under `name`
    pub fn get_type(&self, name: &str) -> Result<Arc<dyn DbalType>> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Type \"{name}\"")))
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<String> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}
