//! Class metadata
//!
//! Persistence metadata of one mapped class, as produced by a mapping
//! driver and completed by the naming strategy and typed field mapper.

use crate::ports::orm::NamingStrategy;
use serde::{Deserialize, Serialize};

/// Mapping of one class field to a column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Field (property) name
    pub field: String,
    /// Column name, derived from the naming strategy when unset
    pub column: Option<String>,
    /// Column type name, derived from `rust_type` when unset
    pub type_name: Option<String>,
    /// Declared Rust type of the field, used by typed field mappers
    pub rust_type: Option<String>,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether the field is part of the identifier
    pub id: bool,
}

impl FieldMapping {
    /// Create a mapping for the given field
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Set the column name
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the column type name
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the declared Rust type
    pub fn rust_type(mut self, rust_type: impl Into<String>) -> Self {
        self.rust_type = Some(rust_type.into());
        self
    }

    /// Mark the column nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the field as identifier
    pub fn id(mut self) -> Self {
        self.id = true;
        self
    }
}

/// Loaded metadata of a mapped class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// Class name
    pub class: String,
    /// Table name
    pub table: String,
    /// Field mappings in declaration order
    pub fields: Vec<FieldMapping>,
    /// Entity listener component names
    pub entity_listeners: Vec<String>,
}

impl ClassMetadata {
    /// Identifier field names
    pub fn identifier(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.id)
            .map(|f| f.field.as_str())
            .collect()
    }

    /// Mapping of a single field
    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter_map(|f| f.column.as_deref())
            .collect()
    }
}

/// Accumulates metadata while a mapping driver loads a class
#[derive(Debug, Clone)]
pub struct ClassMetadataBuilder {
    class: String,
    table: Option<String>,
    fields: Vec<FieldMapping>,
    entity_listeners: Vec<String>,
}

impl ClassMetadataBuilder {
    /// Start metadata for `class`
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            table: None,
            fields: Vec::new(),
            entity_listeners: Vec::new(),
        }
    }

    /// Class being loaded
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Explicit table name, if any
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Set the table name
    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// Add or replace a field mapping
    pub fn field(&mut self, mapping: FieldMapping) -> &mut Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.field == mapping.field) {
            *existing = mapping;
        } else {
            self.fields.push(mapping);
        }
        self
    }

    /// Attach an entity listener component
    pub fn entity_listener(&mut self, listener: impl Into<String>) -> &mut Self {
        self.entity_listeners.push(listener.into());
        self
    }

    /// Field mappings collected so far
    pub fn fields_mut(&mut self) -> &mut [FieldMapping] {
        &mut self.fields
    }

    /// Finish the metadata, filling table and column names from `naming`
    pub fn build(self, naming: &dyn NamingStrategy) -> ClassMetadata {
        let table = self
            .table
            .unwrap_or_else(|| naming.class_to_table_name(&self.class));
        let fields = self
            .fields
            .into_iter()
            .map(|mut f| {
                if f.column.is_none() {
                    f.column = Some(naming.property_to_column_name(&f.field, &self.class));
                }
                f
            })
            .collect();

        ClassMetadata {
            class: self.class,
            table,
            fields,
            entity_listeners: self.entity_listeners,
        }
    }
}
