//! Entity Registry
//!
//! Entity classes mapped at compile time. Attribute-style mappings list
//! every entry inside their namespace; static-code mappings only those with
//! a `load_metadata` function.
//!
//! ```ignore
//! #[linkme::distributed_slice(ENTITIES)]
//! static USER: EntityEntry = EntityEntry {
//!     class: "app::entity::User",
//!     table: Some("users"),
//!     load_metadata: Some(|builder| {
//!         builder.field(FieldMapping::new("id").type_name("integer").id());
//!     }),
//! };
//! ```

use dorm_domain::value_objects::ClassMetadataBuilder;

/// Registry entry for a compile-time mapped class
pub struct EntityEntry {
    /// Fully qualified class name
    pub class: &'static str,
    /// Explicit table name, naming strategy applies when `None`
    pub table: Option<&'static str>,
    /// Static metadata loader
    pub load_metadata: Option<fn(&mut ClassMetadataBuilder)>,
}

#[linkme::distributed_slice]
pub static ENTITIES: [EntityEntry] = [..];

/// Entity registered for `class`
pub fn find_entity(class: &str) -> Option<&'static EntityEntry> {
    ENTITIES.iter().find(|e| e.class == class)
}

/// All registered entity class names
pub fn list_entities() -> Vec<&'static str> {
    ENTITIES.iter().map(|e| e.class).collect()
}
