//! PostgreSQL driver
//!
//! Sessions are taken from an `r2d2` pool built on first use of the
//! driver. The pool is sized by `params.pool_size`.

use crate::constants::POSTGRES_DEFAULT_POOL_SIZE;
use crate::dbal::platform::GenericPlatform;
use dorm_application::ports::registry::{DATABASE_DRIVERS, DriverEntry};
use dorm_domain::error::{Error, Result};
use dorm_domain::ports::dbal::{DatabasePlatform, Driver, DriverConnection};
use dorm_domain::value_objects::ConnectionParams;
use r2d2::{Pool, PooledConnection};
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::{Config, NoTls};
use std::fmt;
use std::sync::Arc;

type Manager = PostgresConnectionManager<NoTls>;

/// PostgreSQL driver backed by a session pool
pub struct PostgresDriver {
    pool: Pool<Manager>,
}

impl PostgresDriver {
    /// Create a driver for the server described by `params`
    ///
    /// No session is opened until the first `connect`.
    pub fn new(params: &ConnectionParams) -> Result<Self> {
        let config: Config = params.to_url("postgres").parse().map_err(|e| {
            Error::configuration_with_source("Invalid PostgreSQL connection parameters", e)
        })?;
        let manager = PostgresConnectionManager::new(config, NoTls);
        let pool = Pool::builder()
            .max_size(params.pool_size.unwrap_or(POSTGRES_DEFAULT_POOL_SIZE))
            .build_unchecked(manager);

        Ok(Self { pool })
    }
}

impl fmt::Debug for PostgresDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDriver")
            .field("max_size", &self.pool.max_size())
            .finish_non_exhaustive()
    }
}

impl Driver for PostgresDriver {
    fn name(&self) -> &str {
        "pdo_pgsql"
    }

    fn connect(&self, _params: &ConnectionParams) -> Result<Box<dyn DriverConnection>> {
        let client = self
            .pool
            .get()
            .map_err(|e| Error::database_with_source("Failed to connect to PostgreSQL", e))?;
        Ok(Box::new(PostgresConnection { client }))
    }

    fn database_platform(&self, _params: &ConnectionParams) -> Arc<dyn DatabasePlatform> {
        Arc::new(GenericPlatform::postgresql())
    }

    fn with_params(&self, params: &ConnectionParams) -> Result<Arc<dyn Driver>> {
        Ok(Arc::new(Self::new(params)?))
    }
}

struct PostgresConnection {
    client: PooledConnection<Manager>,
}

fn query_error(e: r2d2_postgres::postgres::Error) -> Error {
    Error::database_with_source("PostgreSQL statement failed", e)
}

impl DriverConnection for PostgresConnection {
    fn execute_statement(&mut self, sql: &str) -> Result<u64> {
        self.client.execute(sql, &[]).map_err(query_error)
    }

    fn fetch_first_column(&mut self, sql: &str) -> Result<Vec<String>> {
        self.client
            .query(sql, &[])
            .map_err(query_error)?
            .iter()
            .map(|row| row.try_get(0).map_err(query_error))
            .collect()
    }

    fn server_version(&mut self) -> Result<String> {
        let row = self
            .client
            .query_one("SHOW server_version", &[])
            .map_err(query_error)?;
        row.try_get(0).map_err(query_error)
    }

    fn begin_transaction(&mut self) -> Result<()> {
        self.client.batch_execute("BEGIN").map_err(query_error)
    }

    fn commit(&mut self) -> Result<()> {
        self.client.batch_execute("COMMIT").map_err(query_error)
    }

    fn roll_back(&mut self) -> Result<()> {
        self.client.batch_execute("ROLLBACK").map_err(query_error)
    }
}

#[linkme::distributed_slice(DATABASE_DRIVERS)]
static POSTGRES_DRIVER: DriverEntry = DriverEntry {
    name: "pdo_pgsql",
    aliases: &["pgsql", "postgres", "postgresql"],
    description: "PostgreSQL driver with r2d2 session pool",
    factory: |params: &ConnectionParams| {
        let driver = PostgresDriver::new(params).map_err(|e| e.to_string())?;
        Ok(Arc::new(driver))
    },
};
