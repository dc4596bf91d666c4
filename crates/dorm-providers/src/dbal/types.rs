//! Custom column types

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::dbal::{DatabasePlatform, DbalType};
use serde_json::Value;
use std::sync::Arc;

/// Canonical textual UUID column type
///
/// Native `UUID` columns on PostgreSQL, `CHAR(36)` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidType;

impl UuidType {
    fn is_uuid(value: &str) -> bool {
        const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
        let parts: Vec<&str> = value.split('-').collect();
        parts.len() == GROUPS.len()
            && parts
                .iter()
                .zip(GROUPS)
                .all(|(part, len)| part.len() == len && part.chars().all(|c| c.is_ascii_hexdigit()))
    }

    fn checked(value: &Value) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) if Self::is_uuid(s) => Ok(Value::String(s.to_ascii_lowercase())),
            other => Err(Error::invalid_argument(format!(
                "Could not convert {other} to uuid"
            ))),
        }
    }
}

impl DbalType for UuidType {
    fn name(&self) -> &str {
        "uuid"
    }

    fn sql_declaration(&self, platform: &dyn DatabasePlatform) -> String {
        if platform.name() == "postgresql" {
            "UUID".to_string()
        } else {
            "CHAR(36)".to_string()
        }
    }

    fn convert_to_database_value(&self, value: &Value) -> Result<Value> {
        Self::checked(value)
    }

    fn convert_to_native_value(&self, value: &Value) -> Result<Value> {
        Self::checked(value)
    }

    fn requires_sql_comment_hint(&self) -> bool {
        true
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static UUID_TYPE: ComponentEntry = ComponentEntry {
    name: "dbal.type.uuid",
    description: "UUID column type",
    factory: || Component::new().provide::<dyn DbalType>(Arc::new(UuidType)),
};
