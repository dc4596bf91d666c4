//! Doctrine manager factory

use crate::config::AppConfig;
use crate::dbal::ConnectionFactory;
use crate::manager::DoctrineManager;
use crate::orm::EntityManagerFactory;
use dorm_domain::error::Result;
use tracing::info;

/// Builds the registry from the `[[dbal]]` and `[[orm.entity_managers]]` blocks
#[derive(Debug, Clone)]
pub struct DoctrineManagerFactory {
    connections: ConnectionFactory,
    entity_managers: EntityManagerFactory,
}

impl DoctrineManagerFactory {
    pub fn new(connections: ConnectionFactory, entity_managers: EntityManagerFactory) -> Self {
        Self {
            connections,
            entity_managers,
        }
    }

    /// Every configured connection, then every entity manager on its
    /// connection; an entity manager must name its connection
    pub fn create(&self, config: &AppConfig) -> Result<DoctrineManager> {
        let mut manager =
            DoctrineManager::new(&config.default_connection, &config.orm.default_entity_manager);

        for dbal in &config.dbal {
            let connection = self.connections.create(dbal)?;
            manager.add_connection(dbal.name.clone(), connection)?;
        }

        for em in &config.orm.entity_managers {
            let connection = manager.get_connection(Some(em.connection_name()?))?;
            let entity_manager = self
                .entity_managers
                .create(connection, em, &config.orm.proxies)?;
            manager.add_manager(em.name.clone(), entity_manager)?;
        }

        info!(
            connections = manager.connection_names().len(),
            entity_managers = manager.manager_names().len(),
            "Doctrine manager ready"
        );
        Ok(manager)
    }

    pub fn connections(&self) -> &ConnectionFactory {
        &self.connections
    }

    pub fn entity_managers(&self) -> &EntityManagerFactory {
        &self.entity_managers
    }
}
