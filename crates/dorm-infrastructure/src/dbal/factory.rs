//! Connection factory
//!
//! ```text
//! [[dbal]] ──> params check ──> DbalConfiguration ──> event manager
//!                                                         │
//!   custom/mapping types <── Connection <── middlewares <── driver
//! ```

use crate::config::DbalConfig;
use crate::dbal::{Connection, DbalConfigurationFactory, TypeRegistry};
use crate::di::Injector;
use crate::events::EventManagerFactory;
use dorm_application::ports::registry::resolve_driver;
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::dbal::{DbalType, Driver};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds live connections from `[[dbal]]` blocks
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    injector: Arc<Injector>,
    types: Arc<TypeRegistry>,
    configurations: DbalConfigurationFactory,
    events: EventManagerFactory,
}

impl ConnectionFactory {
    pub fn new(injector: Arc<Injector>, types: Arc<TypeRegistry>) -> Self {
        Self {
            configurations: DbalConfigurationFactory::new(Arc::clone(&injector)),
            events: EventManagerFactory::new(Arc::clone(&injector)),
            injector,
            types,
        }
    }

    /// Build the connection described by `config`
    ///
    /// Nothing is constructed when `params` is missing.
    pub fn create(&self, config: &DbalConfig) -> Result<Arc<Connection>> {
        let params = config
            .params
            .as_ref()
            .ok_or_else(|| Error::configuration("Not found \"params\" connection"))?;

        let configuration = self.configurations.create(config)?;
        let event_manager = self.events.create_for_dbal(&config.events)?;

        let driver = resolve_driver(params).map_err(|e| {
            Error::configuration(format!(
                "Failed to resolve driver of connection \"{}\": {e}",
                config.name
            ))
        })?;
        let driver: Arc<dyn Driver> = configuration
            .middlewares()
            .iter()
            .fold(driver, |driver, middleware| middleware.wrap(driver));

        let connection = Connection::new(
            config.name.clone(),
            params.clone(),
            driver,
            configuration,
            event_manager,
        );

        let platform = connection.database_platform();
        for (type_name, component) in &config.custom_types {
            if !self.types.has_type(type_name) {
                let ty = self.injector.make::<dyn DbalType>(component)?;
                self.types.add_type(type_name, ty);
            }
            platform.register_type_mapping(type_name, type_name);
        }

        for (db_type, type_name) in &config.mapping_types {
            platform.register_type_mapping(db_type, type_name);
            debug!(connection = %config.name, %db_type, %type_name, "Mapped database type");
        }

        info!(
            connection = %config.name,
            driver = connection.driver().name(),
            platform = platform.name(),
            "Created connection"
        );
        Ok(Arc::new(connection))
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }
}
