//! Typed field mapper
//!
//! Derives the column type of a field from its declared Rust type when the
//! mapping does not name one. `Option<T>` marks the field nullable.

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::ports::orm::TypedFieldMapper;
use dorm_domain::value_objects::FieldMapping;
use std::sync::Arc;

/// Maps common Rust types to column type names
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypedFieldMapper;

impl DefaultTypedFieldMapper {
    fn type_for(rust_type: &str) -> Option<&'static str> {
        let type_name = match rust_type {
            "i8" | "i16" | "u8" | "u16" => "smallint",
            "i32" | "u32" | "isize" => "integer",
            "i64" | "u64" | "usize" => "bigint",
            "f32" | "f64" => "float",
            "bool" => "boolean",
            "String" | "&str" | "str" => "string",
            "Vec<u8>" => "blob",
            "Value" | "serde_json::Value" => "json",
            "NaiveDate" => "date",
            "NaiveDateTime" => "datetime",
            "DateTime<Utc>" => "datetimetz",
            "Uuid" => "uuid",
            _ => return None,
        };
        Some(type_name)
    }
}

impl TypedFieldMapper for DefaultTypedFieldMapper {
    fn validate_and_complete(&self, field: &mut FieldMapping) {
        let Some(declared) = field.rust_type.clone() else {
            return;
        };

        let inner = declared
            .strip_prefix("Option<")
            .and_then(|t| t.strip_suffix('>'));
        if inner.is_some() {
            field.nullable = true;
        }

        if field.type_name.is_none() {
            field.type_name =
                Self::type_for(inner.unwrap_or(declared.as_str()).trim()).map(str::to_string);
        }
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static DEFAULT_TYPED_FIELD_MAPPER: ComponentEntry = ComponentEntry {
    name: "orm.typed_field_mapper.default",
    description: "Column types derived from Rust field types",
    factory: || {
        Component::new().provide::<dyn TypedFieldMapper>(Arc::new(DefaultTypedFieldMapper))
    },
};
