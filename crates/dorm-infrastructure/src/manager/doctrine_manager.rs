//! Doctrine manager
//!
//! Single source of truth for the named connections and entity managers of
//! a process. Lookups without a name use the configured default names.

use crate::dbal::Connection;
use crate::manager::NamedRegistry;
use crate::orm::EntityManager;
use dorm_domain::error::Result;
use dorm_domain::ports::orm::ObjectRepository;
use dorm_domain::value_objects::class_name::{is_anonymous, real_class};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct DoctrineManager {
    default_connection: String,
    default_manager: String,
    connections: NamedRegistry<Arc<Connection>>,
    managers: NamedRegistry<Arc<EntityManager>>,
}

impl DoctrineManager {
    pub fn new(default_connection: impl Into<String>, default_manager: impl Into<String>) -> Self {
        Self {
            default_connection: default_connection.into(),
            default_manager: default_manager.into(),
            connections: NamedRegistry::new("Connection"),
            managers: NamedRegistry::new("Entity manager"),
        }
    }

    pub fn add_connection(&mut self, name: impl Into<String>, connection: Arc<Connection>) -> Result<()> {
        let name = name.into();
        self.connections.add(name.clone(), connection)?;
        info!(connection = %name, "Registered connection");
        Ok(())
    }

    pub fn add_manager(&mut self, name: impl Into<String>, manager: Arc<EntityManager>) -> Result<()> {
        let name = name.into();
        self.managers.add(name.clone(), manager)?;
        info!(entity_manager = %name, "Registered entity manager");
        Ok(())
    }

    /// Connection `name`, the default one when omitted
    pub fn get_connection(&self, name: Option<&str>) -> Result<Arc<Connection>> {
        let name = name.unwrap_or(self.default_connection.as_str());
        self.connections.get(name).cloned()
    }

    /// Entity manager `name`, the default one when omitted
    pub fn get_manager(&self, name: Option<&str>) -> Result<Arc<EntityManager>> {
        let name = name.unwrap_or(self.default_manager.as_str());
        self.managers.get(name).cloned()
    }

    pub fn has_connection(&self, name: &str) -> bool {
        self.connections.contains(name)
    }

    pub fn has_manager(&self, name: &str) -> bool {
        self.managers.contains(name)
    }

    /// Close the driver session of `name` and unregister it
    pub fn close_connection(&mut self, name: &str) -> Result<()> {
        self.connections.get(name)?.close();
        self.connections.remove(name)?;
        info!(connection = name, "Closed connection");
        Ok(())
    }

    /// Close entity manager `name` and unregister it
    pub fn close_manager(&mut self, name: &str) -> Result<()> {
        self.managers.get(name)?.close()?;
        self.managers.remove(name)?;
        info!(entity_manager = name, "Closed entity manager");
        Ok(())
    }

    /// Flush entity manager `name`, the default one when omitted
    pub fn flush_manager(&self, name: Option<&str>) -> Result<usize> {
        self.get_manager(name)?.flush()
    }

    pub fn flush_all_managers(&self) -> Result<usize> {
        let mut flushed = 0;
        for manager in self.managers.values() {
            flushed += manager.flush()?;
        }
        Ok(flushed)
    }

    /// Clear the identity map of entity manager `name`
    pub fn reset_manager(&self, name: Option<&str>) -> Result<Arc<EntityManager>> {
        let manager = self.get_manager(name)?;
        manager.clear()?;
        debug!(entity_manager = manager.name(), "Reset entity manager");
        Ok(manager)
    }

    pub fn reset_all_managers(&self) -> Result<()> {
        for manager in self.managers.values() {
            manager.clear()?;
        }
        Ok(())
    }

    /// First entity manager, in registration order, mapping `class`
    pub fn get_manager_for_class(&self, class: &str) -> Option<Arc<EntityManager>> {
        if is_anonymous(class) {
            return None;
        }
        let class = real_class(class);
        self.managers
            .values()
            .find(|manager| !manager.metadata_factory().is_transient(class))
            .cloned()
    }

    /// Repository of `class` from manager `name`, the owning manager or
    /// the default one
    pub fn get_repository(&self, class: &str, name: Option<&str>) -> Result<Arc<dyn ObjectRepository>> {
        let manager = match name {
            Some(name) => self.get_manager(Some(name))?,
            None => match self.get_manager_for_class(class) {
                Some(manager) => manager,
                None => self.get_manager(None)?,
            },
        };
        manager.get_repository(real_class(class))
    }

    pub fn connection_names(&self) -> Vec<String> {
        self.connections.names()
    }

    pub fn manager_names(&self) -> Vec<String> {
        self.managers.names()
    }

    pub fn connections(&self) -> Vec<(String, Arc<Connection>)> {
        self.connections
            .iter()
            .map(|(name, connection)| (name.to_string(), Arc::clone(connection)))
            .collect()
    }

    pub fn managers(&self) -> Vec<(String, Arc<EntityManager>)> {
        self.managers
            .iter()
            .map(|(name, manager)| (name.to_string(), Arc::clone(manager)))
            .collect()
    }

    pub fn default_connection_name(&self) -> &str {
        &self.default_connection
    }

    pub fn default_manager_name(&self) -> &str {
        &self.default_manager
    }
}
