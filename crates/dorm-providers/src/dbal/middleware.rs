//! Logging middleware
//!
//! Decorates a driver so that connects, statements and transaction
//! boundaries are logged through `tracing`.

use dorm_application::ports::registry::{COMPONENTS, Component, ComponentEntry};
use dorm_domain::error::Result;
use dorm_domain::ports::dbal::{DatabasePlatform, Driver, DriverConnection, Middleware};
use dorm_domain::value_objects::ConnectionParams;
use std::sync::Arc;
use tracing::{debug, info};

/// Middleware wrapping drivers in [`LoggingDriver`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn wrap(&self, driver: Arc<dyn Driver>) -> Arc<dyn Driver> {
        Arc::new(LoggingDriver { inner: driver })
    }
}

/// Driver decorator logging every session it opens
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Arc<dyn Driver>,
}

impl Driver for LoggingDriver {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn DriverConnection>> {
        info!(
            driver = self.inner.name(),
            host = params.host.as_deref().unwrap_or("localhost"),
            dbname = params.dbname.as_deref().unwrap_or_default(),
            "Connecting"
        );
        let inner = self.inner.connect(params)?;
        Ok(Box::new(LoggingConnection { inner }))
    }

    fn database_platform(&self, params: &ConnectionParams) -> Arc<dyn DatabasePlatform> {
        self.inner.database_platform(params)
    }

    fn with_params(&self, params: &ConnectionParams) -> Result<Arc<dyn Driver>> {
        Ok(Arc::new(Self {
            inner: self.inner.with_params(params)?,
        }))
    }
}

struct LoggingConnection {
    inner: Box<dyn DriverConnection>,
}

impl DriverConnection for LoggingConnection {
    fn execute_statement(&mut self, sql: &str) -> Result<u64> {
        debug!(sql, "Executing statement");
        let affected = self.inner.execute_statement(sql)?;
        debug!(affected, "Statement executed");
        Ok(affected)
    }

    fn fetch_first_column(&mut self, sql: &str) -> Result<Vec<String>> {
        debug!(sql, "Executing query");
        let column = self.inner.fetch_first_column(sql)?;
        debug!(rows = column.len(), "Query executed");
        Ok(column)
    }

    fn server_version(&mut self) -> Result<String> {
        self.inner.server_version()
    }

    fn begin_transaction(&mut self) -> Result<()> {
        debug!("Beginning transaction");
        self.inner.begin_transaction()
    }

    fn commit(&mut self) -> Result<()> {
        debug!("Committing transaction");
        self.inner.commit()
    }

    fn roll_back(&mut self) -> Result<()> {
        debug!("Rolling back transaction");
        self.inner.roll_back()
    }
}

impl Drop for LoggingConnection {
    fn drop(&mut self) {
        debug!("Disconnected");
    }
}

#[linkme::distributed_slice(COMPONENTS)]
static LOGGING_MIDDLEWARE: ComponentEntry = ComponentEntry {
    name: "dbal.middleware.logging",
    description: "Logs connects and statements through tracing",
    factory: || Component::new().provide::<dyn Middleware>(Arc::new(LoggingMiddleware)),
};
