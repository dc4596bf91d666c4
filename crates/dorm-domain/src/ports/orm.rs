//! Object mapper ports
//!
//! Pluggable roles of an entity manager configuration. Each role is
//! resolved by component name and must provide the matching capability.

use crate::error::Result;
use crate::ports::dbal::DatabasePlatform;
use crate::ports::events::EventListener;
use crate::value_objects::{ClassMetadata, ClassMetadataBuilder, FieldMapping, IdentityMap};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Derives table and column names from classes and properties
pub trait NamingStrategy: Send + Sync + fmt::Debug {
    /// Table name for a class
    fn class_to_table_name(&self, class: &str) -> String;

    /// Column name for a property of a class
    fn property_to_column_name(&self, property: &str, class: &str) -> String;

    /// Default referenced column of a join
    fn reference_column_name(&self) -> String {
        "id".to_string()
    }
}

/// Decides how mapped identifiers are quoted in SQL
pub trait QuoteStrategy: Send + Sync + fmt::Debug {
    /// Table name as used in SQL
    fn table_name(&self, metadata: &ClassMetadata, platform: &dyn DatabasePlatform) -> String;

    /// Column name as used in SQL
    fn column_name(&self, field: &FieldMapping, platform: &dyn DatabasePlatform) -> String;
}

/// Instantiates entity listeners by name
pub trait EntityListenerResolver: Send + Sync {
    /// Register a listener instance under `name`
    fn register(&self, name: &str, listener: Arc<dyn EventListener>);

    /// Listener registered under `name`
    fn resolve(&self, name: &str) -> Option<Arc<dyn EventListener>>;

    /// Forget one listener, or all when `name` is `None`
    fn clear(&self, name: Option<&str>);
}

/// Completes field mappings from the declared Rust type
pub trait TypedFieldMapper: Send + Sync {
    /// Fill in the column type of `field` when it is missing
    fn validate_and_complete(&self, field: &mut FieldMapping);
}

/// Read access to the managed entities of one class
pub trait ObjectRepository: Send + Sync {
    /// Class served by this repository
    fn class_name(&self) -> &str;

    /// Metadata of the class
    fn metadata(&self) -> &ClassMetadata;

    /// Managed entity by identifier
    fn find(&self, id: &str) -> Option<Value>;

    /// All managed entities of the class
    fn find_all(&self) -> Vec<Value>;
}

/// Creates repositories for entity managers
pub trait RepositoryFactory: Send + Sync {
    /// Repository for a class backed by an identity map
    fn create_repository(
        &self,
        metadata: Arc<ClassMetadata>,
        identity_map: Arc<IdentityMap>,
    ) -> Arc<dyn ObjectRepository>;
}

/// Reads persistence metadata for a set of classes
pub trait MappingDriver: Send + Sync + fmt::Debug {
    /// Every class this driver can map
    fn all_class_names(&self) -> Result<Vec<String>>;

    /// True when the driver does not map `class`
    fn is_transient(&self, class: &str) -> bool;

    /// Load the metadata of `class` into `builder`
    fn load_metadata_for_class(&self, class: &str, builder: &mut ClassMetadataBuilder)
    -> Result<()>;
}
