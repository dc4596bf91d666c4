//! Registry lookups handed to consumers that only read

use crate::dbal::Connection;
use crate::manager::DoctrineManager;
use crate::orm::EntityManager;
use dorm_domain::error::Result;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct ConnectionProvider<'a> {
    manager: &'a DoctrineManager,
}

impl<'a> ConnectionProvider<'a> {
    pub fn new(manager: &'a DoctrineManager) -> Self {
        Self { manager }
    }

    /// Connection `name`, the default one when omitted
    pub fn get(&self, name: Option<&str>) -> Result<Arc<Connection>> {
        self.manager.get_connection(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EntityManagerProvider<'a> {
    manager: &'a DoctrineManager,
}

impl<'a> EntityManagerProvider<'a> {
    pub fn new(manager: &'a DoctrineManager) -> Self {
        Self { manager }
    }

    /// Entity manager `name`, the default one when omitted
    pub fn get(&self, name: Option<&str>) -> Result<Arc<EntityManager>> {
        self.manager.get_manager(name)
    }
}
