//! Runtime registration of connections and entity managers

use crate::config::{DbalConfig, EntityManagerConfig, ProxyConfig};
use crate::dbal::{Connection, ConnectionFactory};
use crate::manager::DoctrineManager;
use crate::orm::{EntityManager, EntityManagerFactory};
use dorm_domain::error::{Error, Result};
use std::sync::Arc;

/// Adds a connection built from a `[[dbal]]` block to a live registry
#[derive(Debug, Clone)]
pub struct DynamicConnectionFactory {
    factory: ConnectionFactory,
}

impl DynamicConnectionFactory {
    pub fn new(factory: ConnectionFactory) -> Self {
        Self { factory }
    }

    /// Build and register connection `config.name`
    ///
    /// The name is checked before anything is constructed.
    pub fn create(&self, manager: &mut DoctrineManager, config: &DbalConfig) -> Result<Arc<Connection>> {
        if manager.has_connection(&config.name) {
            return Err(Error::duplicate_name("Connection", &config.name));
        }
        let connection = self.factory.create(config)?;
        manager.add_connection(config.name.clone(), Arc::clone(&connection))?;
        Ok(connection)
    }
}

/// Adds an entity manager to a live registry
#[derive(Debug, Clone)]
pub struct DynamicEntityManagerFactory {
    factory: EntityManagerFactory,
    proxies: ProxyConfig,
}

impl DynamicEntityManagerFactory {
    pub fn new(factory: EntityManagerFactory, proxies: ProxyConfig) -> Self {
        Self { factory, proxies }
    }

    /// Build and register entity manager `config.name` on its connection
    pub fn create(
        &self,
        manager: &mut DoctrineManager,
        config: &EntityManagerConfig,
    ) -> Result<Arc<EntityManager>> {
        if manager.has_manager(&config.name) {
            return Err(Error::duplicate_name("Entity manager", &config.name));
        }
        let connection = manager.get_connection(Some(config.connection_name()?))?;
        let entity_manager = self.factory.create(connection, config, &self.proxies)?;
        manager.add_manager(config.name.clone(), Arc::clone(&entity_manager))?;
        Ok(entity_manager)
    }
}
