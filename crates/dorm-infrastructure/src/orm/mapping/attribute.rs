//! Attribute mapping driver
//!
//! Classes declared in the `ENTITIES` registry, the compile-time analogue
//! of annotated entity classes.

use super::not_mapped;
use dorm_application::ports::registry::{ENTITIES, find_entity};
use dorm_domain::error::Result;
use dorm_domain::ports::orm::MappingDriver;
use dorm_domain::value_objects::ClassMetadataBuilder;
use dorm_domain::value_objects::class_name::in_namespace;

#[derive(Debug, Clone)]
pub struct AttributeDriver {
    namespace: String,
    dir: String,
}

impl AttributeDriver {
    /// Driver for registered classes in `namespace`; `dir` is informational
    pub fn new(namespace: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }
}

impl MappingDriver for AttributeDriver {
    fn all_class_names(&self) -> Result<Vec<String>> {
        Ok(ENTITIES
            .iter()
            .filter(|entry| in_namespace(entry.class, &self.namespace))
            .map(|entry| entry.class.to_string())
            .collect())
    }

    fn is_transient(&self, class: &str) -> bool {
        !in_namespace(class, &self.namespace) || find_entity(class).is_none()
    }

    fn load_metadata_for_class(
        &self,
        class: &str,
        builder: &mut ClassMetadataBuilder,
    ) -> Result<()> {
        let entry = find_entity(class)
            .filter(|entry| in_namespace(entry.class, &self.namespace))
            .ok_or_else(|| not_mapped(class))?;
        if let Some(table) = entry.table {
            builder.table(table);
        }
        if let Some(load) = entry.load_metadata {
            load(builder);
        }
        Ok(())
    }
}
