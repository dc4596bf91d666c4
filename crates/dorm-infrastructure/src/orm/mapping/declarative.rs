//! Declarative mapping driver
//!
//! One TOML file per class, named after the full class path with `.`
//! separators (`app.entity.User.dcm.toml`):
//!
//! ```toml
//! table = "users"
//! entity_listeners = ["app::listener::UserListener"]
//!
//! [[fields]]
//! field = "id"
//! type_name = "integer"
//! id = true
//! ```

use super::{FileLocator, not_mapped};
use dorm_domain::constants::CLASS_SEPARATOR;
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::orm::MappingDriver;
use dorm_domain::value_objects::class_name::{dotted, in_namespace};
use dorm_domain::value_objects::{ClassMetadataBuilder, FieldMapping};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeclarativeMapping {
    table: Option<String>,
    fields: Vec<FieldMapping>,
    entity_listeners: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DeclarativeDriver {
    locator: FileLocator,
    namespace: String,
}

impl DeclarativeDriver {
    pub fn new(
        dir: impl Into<std::path::PathBuf>,
        namespace: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            locator: FileLocator::new(dir, extension),
            namespace: namespace.into(),
        }
    }

    pub fn locator(&self) -> &FileLocator {
        &self.locator
    }
}

impl MappingDriver for DeclarativeDriver {
    fn all_class_names(&self) -> Result<Vec<String>> {
        Ok(self
            .locator
            .names()?
            .into_iter()
            .map(|name| name.replace('.', CLASS_SEPARATOR))
            .filter(|class| in_namespace(class, &self.namespace))
            .collect())
    }

    fn is_transient(&self, class: &str) -> bool {
        !in_namespace(class, &self.namespace) || !self.locator.exists(&dotted(class))
    }

    fn load_metadata_for_class(
        &self,
        class: &str,
        builder: &mut ClassMetadataBuilder,
    ) -> Result<()> {
        if !in_namespace(class, &self.namespace) {
            return Err(not_mapped(class));
        }
        let name = dotted(class);
        let content = self.locator.read(&name)?;
        let mapping: DeclarativeMapping = toml::from_str(&content).map_err(|e| {
            Error::mapping(format!(
                "Invalid mapping file {}: {e}",
                self.locator.path_for(&name).display()
            ))
        })?;

        if let Some(table) = mapping.table {
            builder.table(table);
        }
        for field in mapping.fields {
            builder.field(field);
        }
        for listener in mapping.entity_listeners {
            builder.entity_listener(listener);
        }
        Ok(())
    }
}
