//! Entity manager factory

use crate::config::{EntityManagerConfig, ProxyConfig};
use crate::dbal::Connection;
use crate::events::EventManagerFactory;
use crate::orm::{EntityManager, OrmConfigurationFactory};
use dorm_domain::error::Result;
use std::sync::Arc;
use tracing::info;

/// Combines a connection, an ORM configuration and an event bundle
#[derive(Debug, Clone)]
pub struct EntityManagerFactory {
    configurations: OrmConfigurationFactory,
    events: EventManagerFactory,
}

impl EntityManagerFactory {
    pub fn new(configurations: OrmConfigurationFactory, events: EventManagerFactory) -> Self {
        Self {
            configurations,
            events,
        }
    }

    /// Entity manager for `config` on `connection`
    ///
    /// The manager shares the connection's event manager; its own listeners
    /// are added to it.
    pub fn create(
        &self,
        connection: Arc<Connection>,
        config: &EntityManagerConfig,
        proxies: &ProxyConfig,
    ) -> Result<Arc<EntityManager>> {
        let configuration = self.configurations.create(config, proxies)?;
        let event_manager = Arc::clone(connection.event_manager());
        self.events.create_for_orm(&event_manager, &config.events)?;

        info!(
            entity_manager = %config.name,
            connection = connection.name(),
            "Created entity manager"
        );
        Ok(Arc::new(EntityManager::new(
            config.name.clone(),
            connection,
            configuration,
            event_manager,
        )))
    }
}
