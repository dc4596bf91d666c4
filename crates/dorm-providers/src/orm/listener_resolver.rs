//! Entity listener resolver

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::ports::events::EventListener;
use dorm_domain::ports::orm::EntityListenerResolver;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Resolver holding listener instances registered by name
#[derive(Default)]
pub struct DefaultEntityListenerResolver {
    instances: RwLock<HashMap<String, Arc<dyn EventListener>>>,
}

impl DefaultEntityListenerResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityListenerResolver for DefaultEntityListenerResolver {
    fn register(&self, name: &str, listener: Arc<dyn EventListener>) {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), listener);
    }

    fn resolve(&self, name: &str) -> Option<Arc<dyn EventListener>> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn clear(&self, name: Option<&str>) {
        let mut instances = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match name {
            Some(name) => {
                instances.remove(name);
            }
            None => instances.clear(),
        }
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static DEFAULT_LISTENER_RESOLVER: ComponentEntry = ComponentEntry {
    name: "orm.listener_resolver.default",
    description: "Entity listeners registered by name",
    factory: || {
        Component::new()
            .provide::<dyn EntityListenerResolver>(Arc::new(DefaultEntityListenerResolver::new()))
    },
};
