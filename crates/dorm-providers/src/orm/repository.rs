//! Entity repositories

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::ports::orm::{ObjectRepository, RepositoryFactory};
use dorm_domain::value_objects::{ClassMetadata, IdentityMap};
use serde_json::Value;
use std::sync::Arc;

/// Repository reading the managed entities of one class
pub struct EntityRepository {
    metadata: Arc<ClassMetadata>,
    identity_map: Arc<IdentityMap>,
}

impl EntityRepository {
    /// Create a repository over an entity manager identity map
    pub fn new(metadata: Arc<ClassMetadata>, identity_map: Arc<IdentityMap>) -> Self {
        Self {
            metadata,
            identity_map,
        }
    }

    /// Managed entities whose `field` equals `value`
    pub fn find_by(&self, field: &str, value: &Value) -> Vec<Value> {
        self.find_all()
            .into_iter()
            .filter(|entity| entity.get(field) == Some(value))
            .collect()
    }
}

impl ObjectRepository for EntityRepository {
    fn class_name(&self) -> &str {
        &self.metadata.class
    }

    fn metadata(&self) -> &ClassMetadata {
        &self.metadata
    }

    fn find(&self, id: &str) -> Option<Value> {
        self.identity_map.get(&self.metadata.class, id)
    }

    fn find_all(&self) -> Vec<Value> {
        self.identity_map
            .entities_of(&self.metadata.class)
            .into_iter()
            .map(|(_, entity)| entity)
            .collect()
    }
}

/// Creates one [`EntityRepository`] per class
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRepositoryFactory;

impl RepositoryFactory for DefaultRepositoryFactory {
    fn create_repository(
        &self,
        metadata: Arc<ClassMetadata>,
        identity_map: Arc<IdentityMap>,
    ) -> Arc<dyn ObjectRepository> {
        Arc::new(EntityRepository::new(metadata, identity_map))
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static DEFAULT_REPOSITORY_FACTORY: ComponentEntry = ComponentEntry {
    name: "orm.repository_factory.default",
    description: "Identity-map backed entity repositories",
    factory: || {
        Component::new().provide::<dyn RepositoryFactory>(Arc::new(DefaultRepositoryFactory))
    },
};
