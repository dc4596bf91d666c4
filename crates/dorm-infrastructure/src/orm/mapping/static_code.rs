//! Static code mapping driver
//!
//! Only registry entries carrying a `load_metadata` function are mapped.

use super::not_mapped;
use dorm_application::ports::registry::{ENTITIES, EntityEntry, find_entity};
use dorm_domain::error::Result;
use dorm_domain::ports::orm::MappingDriver;
use dorm_domain::value_objects::ClassMetadataBuilder;
use dorm_domain::value_objects::class_name::in_namespace;

#[derive(Debug, Clone)]
pub struct StaticCodeDriver {
    namespace: String,
}

impl StaticCodeDriver {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    fn entry(&self, class: &str) -> Option<&'static EntityEntry> {
        find_entity(class)
            .filter(|entry| entry.load_metadata.is_some() && in_namespace(entry.class, &self.namespace))
    }
}

impl MappingDriver for StaticCodeDriver {
    fn all_class_names(&self) -> Result<Vec<String>> {
        Ok(ENTITIES
            .iter()
            .filter(|entry| {
                entry.load_metadata.is_some() && in_namespace(entry.class, &self.namespace)
            })
            .map(|entry| entry.class.to_string())
            .collect())
    }

    fn is_transient(&self, class: &str) -> bool {
        self.entry(class).is_none()
    }

    fn load_metadata_for_class(
        &self,
        class: &str,
        builder: &mut ClassMetadataBuilder,
    ) -> Result<()> {
        let entry = self.entry(class).ok_or_else(|| not_mapped(class))?;
        if let Some(table) = entry.table {
            builder.table(table);
        }
        if let Some(load) = entry.load_metadata {
            load(builder);
        }
        Ok(())
    }
}
