//! Component injector
//!
//! ```text
//! ┌──────────────┐    ┌────────────────────┐    ┌───────────────┐
//! │ config name  │───>│ bindings / linkme  │───>│  Component    │
//! │ "orm.naming" │    │ COMPONENTS lookup  │    │ capability T  │
//! └──────────────┘    └────────────────────┘    └───────────────┘
//! ```
//!
//! Programmatic bindings take precedence over link-time registrations, so
//! tests and applications can override a registered component.

use dorm_application::ports::registry::{Component, find_component};
use dorm_domain::error::{Error, Result};
use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Factory of a programmatically bound component
pub type ComponentFactory = Arc<dyn Fn() -> Component + Send + Sync>;

/// Resolves component names to capabilities
#[derive(Default)]
pub struct Injector {
    bindings: RwLock<BTreeMap<String, ComponentFactory>>,
}

impl Injector {
    /// Injector with no bindings, link-time components only
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `factory`, replacing any previous binding
    pub fn bind<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(component = %name, "Bound component");
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(factory));
    }

    /// Bind `name` to a single shared capability
    pub fn bind_instance<T: ?Sized + Send + Sync + 'static>(
        &self,
        name: impl Into<String>,
        value: Arc<T>,
    ) {
        self.bind(name, move || Component::new().provide::<T>(Arc::clone(&value)));
    }

    /// True when `name` is bound or registered
    pub fn has(&self, name: &str) -> bool {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
            || find_component(name).is_some()
    }

    /// Instantiate the component registered under `name`
    pub fn component(&self, name: &str) -> Result<Component> {
        let bound = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        if let Some(factory) = bound {
            return Ok(factory());
        }

        find_component(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| Error::configuration(format!("Component \"{name}\" is not registered")))
    }

    /// Instantiate `name` and take its capability `T`
    pub fn make<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        self.component(name)?
            .get::<T>()
            .ok_or_else(|| Error::capability_mismatch(name, type_name::<T>()))
    }

    /// Resolve an optional component, `None` when unset
    pub fn make_optional<T: ?Sized + Send + Sync + 'static>(
        &self,
        name: Option<&str>,
    ) -> Result<Option<Arc<T>>> {
        name.map(|name| self.make::<T>(name)).transpose()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Injector")
            .field("bindings", &bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}
