//! XML mapping driver
//!
//! One file per class, named after the class path relative to the mapping
//! namespace with `.` separators:
//!
//! ```xml
//! <dorm-mapping>
//!   <entity name="app::entity::User" table="users">
//!     <id name="id" type="integer"/>
//!     <field name="email" type="string" column="email_address" nullable="true"/>
//!     <entity-listeners>
//!       <entity-listener class="app::listener::UserListener"/>
//!     </entity-listeners>
//!   </entity>
//! </dorm-mapping>
//! ```
//!
//! `id` elements come before `field` elements.

use super::{FileLocator, not_mapped};
use dorm_domain::constants::CLASS_SEPARATOR;
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::orm::MappingDriver;
use dorm_domain::value_objects::class_name::{dotted, relative_to};
use dorm_domain::value_objects::{ClassMetadataBuilder, FieldMapping};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct XmlMapping {
    #[serde(rename = "entity", default)]
    entities: Vec<XmlEntity>,
}

#[derive(Debug, Deserialize)]
struct XmlEntity {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@table")]
    table: Option<String>,
    #[serde(rename = "id", default)]
    ids: Vec<XmlField>,
    #[serde(rename = "field", default)]
    fields: Vec<XmlField>,
    #[serde(rename = "entity-listeners")]
    entity_listeners: Option<XmlEntityListeners>,
}

#[derive(Debug, Deserialize)]
struct XmlField {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    type_name: Option<String>,
    #[serde(rename = "@column")]
    column: Option<String>,
    #[serde(rename = "@nullable", default)]
    nullable: bool,
}

impl XmlField {
    fn into_mapping(self, id: bool) -> FieldMapping {
        FieldMapping {
            field: self.name,
            column: self.column,
            type_name: self.type_name,
            rust_type: None,
            nullable: self.nullable,
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct XmlEntityListeners {
    #[serde(rename = "entity-listener", default)]
    listeners: Vec<XmlEntityListener>,
}

#[derive(Debug, Deserialize)]
struct XmlEntityListener {
    #[serde(rename = "@class")]
    class: String,
}

#[derive(Debug, Clone)]
pub struct XmlDriver {
    locator: FileLocator,
    namespace: String,
}

impl XmlDriver {
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

    fn file_name(&self, class: &str) -> Option<String> {
        relative_to(class, &self.namespace).map(dotted)
    }
}

impl MappingDriver for XmlDriver {
    fn all_class_names(&self) -> Result<Vec<String>> {
        let namespace = self.namespace.trim_end_matches(CLASS_SEPARATOR);
        Ok(self
            .locator
            .names()?
            .into_iter()
            .map(|name| {
                let relative = name.replace('.', CLASS_SEPARATOR);
                if namespace.is_empty() {
                    relative
                } else {
                    format!("{namespace}{CLASS_SEPARATOR}{relative}")
                }
            })
            .collect())
    }

    fn is_transient(&self, class: &str) -> bool {
        self.file_name(class)
            .is_none_or(|name| !self.locator.exists(&name))
    }

    fn load_metadata_for_class(
        &self,
        class: &str,
        builder: &mut ClassMetadataBuilder,
    ) -> Result<()> {
        let name = self.file_name(class).ok_or_else(|| not_mapped(class))?;
        let content = self.locator.read(&name)?;
        let mapping: XmlMapping = quick_xml::de::from_str(&content).map_err(|e| {
            Error::mapping(format!(
                "Invalid XML mapping {}: {e}",
                self.locator.path_for(&name).display()
            ))
        })?;

        let entity = mapping
            .entities
            .into_iter()
            .find(|entity| entity.name == class)
            .ok_or_else(|| {
                Error::mapping(format!(
                    "No mapping for class \"{class}\" in {}",
                    self.locator.path_for(&name).display()
                ))
            })?;

        if let Some(table) = entity.table {
            builder.table(table);
        }
        for id in entity.ids {
            builder.field(id.into_mapping(true));
        }
        for field in entity.fields {
            builder.field(field.into_mapping(false));
        }
        for listener in entity.entity_listeners.into_iter().flat_map(|l| l.listeners) {
            builder.entity_listener(listener.class);
        }
        Ok(())
    }
}
