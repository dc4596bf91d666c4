//! Component Registry
//!
//! Injectable components registered by name. A [`Component`] is a bag of
//! capabilities: each capability is an `Arc<dyn Trait>` stored under the
//! trait object type, so a single implementation can serve several roles
//! (an event subscriber is also an event listener).
//!
//! ```ignore
//! #[linkme::distributed_slice(COMPONENTS)]
//! static UNDERSCORE_NAMING: ComponentEntry = ComponentEntry {
//!     name: "orm.naming.underscore",
//!     description: "snake_case table and column names",
//!     factory: || Component::new()
//!         .provide::<dyn NamingStrategy>(Arc::new(UnderscoreNamingStrategy::default())),
//! };
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct Capability {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// An instantiated component and the capabilities it provides
#[derive(Default)]
pub struct Component {
    capabilities: HashMap<TypeId, Capability>,
}

impl Component {
    /// Create a component without capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the capability `T`, usually a trait object type
    pub fn provide<T: ?Sized + Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.capabilities.insert(
            TypeId::of::<Arc<T>>(),
            Capability {
                type_name: type_name::<T>(),
                value: Box::new(value),
            },
        );
        self
    }

    /// The capability `T`, if provided
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.capabilities
            .get(&TypeId::of::<Arc<T>>())
            .and_then(|c| c.value.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// True when the capability `T` is provided
    pub fn provides<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.capabilities.contains_key(&TypeId::of::<Arc<T>>())
    }

    /// Names of the provided capability types
    pub fn capability_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.capabilities.values().map(|c| c.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("capabilities", &self.capability_names())
            .finish()
    }
}

/// Registry entry for injectable components
pub struct ComponentEntry {
    /// Unique component name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory creating a fresh component
    pub factory: fn() -> Component,
}

#[linkme::distributed_slice]
pub static COMPONENTS: [ComponentEntry] = [..];

/// Component entry registered under `name`
pub fn find_component(name: &str) -> Option<&'static ComponentEntry> {
    COMPONENTS.iter().find(|e| e.name == name)
}

/// List all registered components as (name, description) tuples
pub fn list_components() -> Vec<(&'static str, &'static str)> {
    COMPONENTS.iter().map(|e| (e.name, e.description)).collect()
}
