//! Connection
//!
//! Wraps a driver, the platform it serves and the connection settings.
//! The driver session is opened on first use. With auto-commit off a
//! transaction is always open: one starts on connect and after every
//! commit or rollback of the outermost level.

use crate::dbal::DbalConfiguration;
use crate::events::EventManager;
use dorm_domain::error::{Error, Result};
use dorm_domain::events::{EventArgs, POST_CONNECT};
use dorm_domain::ports::dbal::{DatabasePlatform, Driver, DriverConnection, SchemaManager};
use dorm_domain::value_objects::ConnectionParams;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Default)]
struct Session {
    conn: Option<Box<dyn DriverConnection>>,
    transaction_level: u32,
}

/// A named database connection
pub struct Connection {
    name: String,
    params: ConnectionParams,
    driver: Arc<dyn Driver>,
    platform: Arc<dyn DatabasePlatform>,
    configuration: DbalConfiguration,
    event_manager: Arc<EventManager>,
    session: Mutex<Session>,
}

impl Connection {
    /// Create an unconnected connection
    pub fn new(
        name: impl Into<String>,
        params: ConnectionParams,
        driver: Arc<dyn Driver>,
        configuration: DbalConfiguration,
        event_manager: Arc<EventManager>,
    ) -> Self {
        let platform = driver.database_platform(&params);
        Self {
            name: name.into(),
            params,
            driver,
            platform,
            configuration,
            event_manager,
            session: Mutex::new(Session::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the driver session; false when it was already open
    pub fn connect(&self) -> Result<bool> {
        {
            let mut session = self.lock();
            if session.conn.is_some() {
                return Ok(false);
            }

            let mut conn = self.driver.connect(&self.params)?;
            if !self.configuration.auto_commit() {
                conn.begin_transaction()?;
                session.transaction_level = 1;
            }
            session.conn = Some(conn);
        }

        info!(connection = %self.name, driver = self.driver.name(), "Connected");
        self.event_manager
            .dispatch(&EventArgs::new(POST_CONNECT).with_connection(&self.name))?;
        Ok(true)
    }

    fn with_session<R>(
        &self,
        f: impl FnOnce(&mut dyn DriverConnection, &mut u32) -> Result<R>,
    ) -> Result<R> {
        self.connect()?;
        let mut session = self.lock();
        let Session {
            conn,
            transaction_level,
        } = &mut *session;
        let conn = conn
            .as_deref_mut()
            .ok_or_else(|| Error::closed(format!("Connection \"{}\"", self.name)))?;
        f(conn, transaction_level)
    }

    /// True once the driver session is open
    pub fn is_connected(&self) -> bool {
        self.lock().conn.is_some()
    }

    /// Roll back any open transaction, then drop the driver session
    ///
    /// A pooled session goes back to its pool on drop, so it must not
    /// carry an open transaction. A failed rollback is logged.
    pub fn close(&self) {
        let mut session = self.lock();
        let level = std::mem::take(&mut session.transaction_level);
        if let Some(mut conn) = session.conn.take() {
            if level > 0
                && let Err(e) = conn.roll_back()
            {
                warn!(connection = %self.name, error = %e, "Rollback on close failed");
            }
            debug!(connection = %self.name, "Closed driver session");
        }
    }

    /// Execute `sql`, returning the affected row count
    pub fn execute_statement(&self, sql: &str) -> Result<u64> {
        debug!(connection = %self.name, sql, "Executing statement");
        self.with_session(|conn, _| conn.execute_statement(sql))
    }

    /// Server version, from the `server_version` hint when configured
    pub fn server_version(&self) -> Result<String> {
        if let Some(version) = &self.params.server_version {
            return Ok(version.clone());
        }
        self.with_session(|conn, _| conn.server_version())
    }

    /// Start a transaction, nesting inside an active one
    pub fn begin_transaction(&self) -> Result<()> {
        self.with_session(|conn, level| {
            if *level == 0 {
                conn.begin_transaction()?;
            }
            *level += 1;
            Ok(())
        })
    }

    /// Commit the current nesting level
    pub fn commit(&self) -> Result<()> {
        let auto_commit = self.configuration.auto_commit();
        self.with_session(|conn, level| {
            if *level == 0 {
                return Err(Error::database("There is no active transaction"));
            }
            if *level == 1 {
                conn.commit()?;
            }
            *level -= 1;
            if *level == 0 && !auto_commit {
                conn.begin_transaction()?;
                *level = 1;
            }
            Ok(())
        })
    }

    /// Roll back the current nesting level
    pub fn roll_back(&self) -> Result<()> {
        let auto_commit = self.configuration.auto_commit();
        self.with_session(|conn, level| {
            if *level == 0 {
                return Err(Error::database("There is no active transaction"));
            }
            if *level == 1 {
                conn.roll_back()?;
            }
            *level -= 1;
            if *level == 0 && !auto_commit {
                conn.begin_transaction()?;
                *level = 1;
            }
            Ok(())
        })
    }

    /// True inside a transaction
    pub fn is_transaction_active(&self) -> bool {
        self.lock().transaction_level > 0
    }

    /// Current transaction nesting level
    pub fn transaction_nesting_level(&self) -> u32 {
        self.lock().transaction_level
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn configuration(&self) -> &DbalConfiguration {
        &self.configuration
    }

    pub fn event_manager(&self) -> &Arc<EventManager> {
        &self.event_manager
    }

    pub fn is_auto_commit(&self) -> bool {
        self.configuration.auto_commit()
    }

    pub fn database_platform(&self) -> Arc<dyn DatabasePlatform> {
        Arc::clone(&self.platform)
    }

    /// Schema manager honouring the schema assets filter
    pub fn create_schema_manager(&self) -> Arc<dyn SchemaManager> {
        self.configuration.schema_manager_factory().create_schema_manager(
            self.database_platform(),
            self.configuration.schema_assets_filter(),
        )
    }

    /// Databases of the server
    pub fn list_databases(&self) -> Result<Vec<String>> {
        let schema = self.create_schema_manager();
        self.with_session(|conn, _| schema.list_databases(conn))
    }

    /// Create database `name`, quoted by the caller
    pub fn create_database(&self, name: &str) -> Result<()> {
        let schema = self.create_schema_manager();
        self.with_session(|conn, _| schema.create_database(conn, name))
    }

    /// Drop database `name`, quoted by the caller
    pub fn drop_database(&self, name: &str) -> Result<()> {
        let schema = self.create_schema_manager();
        self.with_session(|conn, _| schema.drop_database(conn, name))
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("driver", &self.driver.name())
            .field("platform", &self.platform.name())
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
