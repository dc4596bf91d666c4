//! Query filter collection

use dorm_domain::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

/// Enabled state of the filters configured for one entity manager
#[derive(Debug, Default)]
pub struct FilterCollection {
    configured: BTreeMap<String, String>,
    enabled: RwLock<BTreeSet<String>>,
}

impl FilterCollection {
    /// Collection over the configured filter name to component map
    pub fn new(configured: BTreeMap<String, String>) -> Self {
        Self {
            configured,
            enabled: RwLock::new(BTreeSet::new()),
        }
    }

    /// Enable `name`, returning its component
    pub fn enable(&self, name: &str) -> Result<&str> {
        let component = self
            .configured
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("Filter \"{name}\" does not exist")))?;
        self.enabled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());
        Ok(component)
    }

    /// Disable `name`; it must be enabled
    pub fn disable(&self, name: &str) -> Result<()> {
        let removed = self
            .enabled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        if removed {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "Filter \"{name}\" is not enabled"
            )))
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    pub fn enabled_filters(&self) -> Vec<String> {
        self.enabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn configured(&self) -> &BTreeMap<String, String> {
        &self.configured
    }
}
