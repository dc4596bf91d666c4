//! Migration dependencies
//!
//! What a migration command runs against: the configuration set and the
//! connection, reached directly or through an entity manager. Exactly one
//! of `connection` and `em` must be configured.

use crate::dbal::Connection;
use crate::manager::DoctrineManager;
use crate::migrations::{MigrationConfiguration, MigrationConfigurationRegistry};
use crate::orm::EntityManager;
use dorm_domain::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Configured target of a migration set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationTarget {
    Connection(String),
    EntityManager(String),
}

impl MigrationTarget {
    /// Target of `configuration`
    pub fn of(configuration: &MigrationConfiguration) -> Result<Self> {
        match (configuration.connection(), configuration.entity_manager()) {
            (Some(connection), None) => Ok(Self::Connection(connection.to_string())),
            (None, Some(em)) => Ok(Self::EntityManager(em.to_string())),
            _ => Err(Error::configuration("Error config")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MigrationDependencies {
    configuration: Arc<MigrationConfiguration>,
    target: MigrationTarget,
    connection: Arc<Connection>,
    entity_manager: Option<Arc<EntityManager>>,
}

impl MigrationDependencies {
    /// Resolve configuration `name` and its target
    pub fn resolve(
        manager: &DoctrineManager,
        registry: &MigrationConfigurationRegistry,
        name: Option<&str>,
    ) -> Result<Self> {
        let configuration = registry.get_configuration(name)?;
        let target = MigrationTarget::of(&configuration)?;

        let (connection, entity_manager) = match &target {
            MigrationTarget::Connection(connection) => {
                (manager.get_connection(Some(connection))?, None)
            }
            MigrationTarget::EntityManager(em) => {
                let em = manager.get_manager(Some(em))?;
                (Arc::clone(em.connection()), Some(em))
            }
        };

        debug!(
            configuration = configuration.name(),
            connection = connection.name(),
            "Resolved migration dependencies"
        );
        Ok(Self {
            configuration,
            target,
            connection,
            entity_manager,
        })
    }

    pub fn configuration(&self) -> &Arc<MigrationConfiguration> {
        &self.configuration
    }

    pub fn target(&self) -> &MigrationTarget {
        &self.target
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    pub fn entity_manager(&self) -> Option<&Arc<EntityManager>> {
        self.entity_manager.as_ref()
    }

    /// Namespace and directory new migrations go to
    ///
    /// Without a requested namespace the first configured one is used.
    pub fn migrations_directory(&self, namespace: Option<&str>) -> Result<(&str, &str)> {
        let paths = self.configuration.migrations_paths();
        match namespace {
            Some(namespace) => paths
                .get_key_value(namespace)
                .map(|(ns, dir)| (ns.as_str(), dir.as_str()))
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "Path not defined for the namespace \"{namespace}\""
                    ))
                }),
            None => paths
                .iter()
                .next()
                .map(|(ns, dir)| (ns.as_str(), dir.as_str()))
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "No migrations paths configured for \"{}\"",
                        self.configuration.name()
                    ))
                }),
        }
    }
}
