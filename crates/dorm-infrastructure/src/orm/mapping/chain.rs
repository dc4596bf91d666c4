//! Mapping driver chain
//!
//! Dispatches on the class namespace: the first driver registered for a
//! namespace containing the class handles it. A class no driver claims is
//! transient.

use super::not_mapped;
use dorm_domain::error::Result;
use dorm_domain::ports::orm::MappingDriver;
use dorm_domain::value_objects::ClassMetadataBuilder;
use dorm_domain::value_objects::class_name::in_namespace;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct MappingDriverChain {
    drivers: Vec<(String, Arc<dyn MappingDriver>)>,
    default_driver: Option<Arc<dyn MappingDriver>>,
}

impl MappingDriverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve classes of `namespace` with `driver`
    pub fn add_driver(&mut self, driver: Arc<dyn MappingDriver>, namespace: impl Into<String>) {
        self.drivers.push((namespace.into(), driver));
    }

    /// Driver for classes outside every namespace
    pub fn set_default_driver(&mut self, driver: Arc<dyn MappingDriver>) {
        self.default_driver = Some(driver);
    }

    /// Registered (namespace, driver) pairs
    pub fn drivers(&self) -> &[(String, Arc<dyn MappingDriver>)] {
        &self.drivers
    }

    pub fn namespaces(&self) -> Vec<&str> {
        self.drivers.iter().map(|(ns, _)| ns.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty() && self.default_driver.is_none()
    }

    fn driver_for(&self, class: &str) -> Option<&Arc<dyn MappingDriver>> {
        self.drivers
            .iter()
            .find(|(namespace, _)| in_namespace(class, namespace))
            .map(|(_, driver)| driver)
            .or(self.default_driver.as_ref())
    }
}

impl MappingDriver for MappingDriverChain {
    fn all_class_names(&self) -> Result<Vec<String>> {
        let mut classes: Vec<String> = Vec::new();
        for (namespace, driver) in &self.drivers {
            for class in driver.all_class_names()? {
                if in_namespace(&class, namespace) && !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
        if let Some(driver) = &self.default_driver {
            for class in driver.all_class_names()? {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
        Ok(classes)
    }

    fn is_transient(&self, class: &str) -> bool {
        self.driver_for(class)
            .is_none_or(|driver| driver.is_transient(class))
    }

    fn load_metadata_for_class(
        &self,
        class: &str,
        builder: &mut ClassMetadataBuilder,
    ) -> Result<()> {
        self.driver_for(class)
            .ok_or_else(|| not_mapped(class))?
            .load_metadata_for_class(class, builder)
    }
}
