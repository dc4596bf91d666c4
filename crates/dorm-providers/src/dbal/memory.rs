//! In-memory database driver
//!
//! Accepts every statement without executing it and keeps a log of what was
//! sent. Used for tests and for wiring checks without a database server.

use crate::constants::{MEMORY_DEFAULT_PLATFORM, MEMORY_SERVER_VERSION};
use crate::dbal::platform::GenericPlatform;
use dorm_application::ports::registry::{DATABASE_DRIVERS, DriverEntry};
use dorm_domain::error::Result;
use dorm_domain::ports::dbal::{DatabasePlatform, Driver, DriverConnection};
use dorm_domain::value_objects::ConnectionParams;
use std::sync::{Arc, Mutex, PoisonError};

type StatementLog = Arc<Mutex<Vec<String>>>;

/// Driver that records statements instead of executing them
#[derive(Debug, Default)]
pub struct MemoryDriver {
    statements: StatementLog,
}

impl MemoryDriver {
    /// Create a driver with an empty statement log
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements received by every session of this driver, oldest first
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Driver for MemoryDriver {
    fn name(&self) -> &str {
        "memory"
    }

    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn DriverConnection>> {
        Ok(Box::new(MemoryConnection {
            statements: Arc::clone(&self.statements),
            server_version: params
                .server_version
                .clone()
                .unwrap_or_else(|| MEMORY_SERVER_VERSION.to_string()),
        }))
    }

    fn database_platform(&self, params: &ConnectionParams) -> Arc<dyn DatabasePlatform> {
        Arc::new(GenericPlatform::for_name(
            params.platform.as_deref().unwrap_or(MEMORY_DEFAULT_PLATFORM),
        ))
    }

    // Derived drivers write to the same log
    fn with_params(&self, _params: &ConnectionParams) -> Result<Arc<dyn Driver>> {
        Ok(Arc::new(Self {
            statements: Arc::clone(&self.statements),
        }))
    }
}

struct MemoryConnection {
    statements: StatementLog,
    server_version: String,
}

impl DriverConnection for MemoryConnection {
    fn execute_statement(&mut self, sql: &str) -> Result<u64> {
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sql.to_string());
        Ok(0)
    }

    fn fetch_first_column(&mut self, sql: &str) -> Result<Vec<String>> {
        self.execute_statement(sql)?;
        Ok(Vec::new())
    }

    fn server_version(&mut self) -> Result<String> {
        Ok(self.server_version.clone())
    }
}

#[linkme::distributed_slice(DATABASE_DRIVERS)]
static MEMORY_DRIVER: DriverEntry = DriverEntry {
    name: "memory",
    aliases: &["in_memory", "pdo_sqlite_memory"],
    description: "In-memory driver recording statements",
    factory: |_params: &ConnectionParams| Ok(Arc::new(MemoryDriver::new())),
};
