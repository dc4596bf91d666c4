//! Database create and drop
//!
//! The target is the connection's `path` (a database file) or its `dbname`.
//! Server databases are handled through a second connection opened without
//! that name, since a server will not drop the database a session is
//! using. PostgreSQL sessions always need a database, so that connection
//! uses `postgres`.

use crate::constants::POSTGRES_MAINTENANCE_DATABASE;
use crate::dbal::Connection;
use crate::error_ext::ErrorContext;
use crate::events::EventManager;
use dorm_domain::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// What a create or drop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseOutcome {
    Created,
    Dropped,
    /// Already present on create, absent on drop
    Skipped,
}

/// Outcome of a create or drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseChange {
    /// Database as addressed: the file path, or the quoted name
    pub database: String,
    pub outcome: DatabaseOutcome,
}

impl DatabaseChange {
    fn new(database: impl Into<String>, outcome: DatabaseOutcome) -> Self {
        Self {
            database: database.into(),
            outcome,
        }
    }
}

enum Target<'a> {
    File(&'a str),
    Server(&'a str),
}

fn target(connection: &Connection) -> Result<Target<'_>> {
    let params = connection.params();
    if let Some(path) = params.path.as_deref() {
        return Ok(Target::File(path));
    }
    params.dbname.as_deref().map(Target::Server).ok_or_else(|| {
        Error::configuration(format!(
            "Connection \"{}\" does not contain a \"path\" or \"dbname\" parameter",
            connection.name()
        ))
    })
}

/// Auto-committing connection to the server of `connection`, without its
/// database name
fn server_connection(connection: &Connection) -> Result<Connection> {
    let mut params = connection.params().clone();
    params.dbname = None;
    params.url = None;
    params.path = None;
    if connection.database_platform().name() == "postgresql" {
        params.dbname = Some(POSTGRES_MAINTENANCE_DATABASE.to_string());
    }

    let mut configuration = connection.configuration().clone();
    configuration.set_auto_commit(true);
    let driver = connection.driver().with_params(&params)?;
    Ok(Connection::new(
        connection.name(),
        params,
        driver,
        configuration,
        Arc::new(EventManager::new()),
    ))
}

/// Run `f` on the server connection, closing it whatever the outcome
fn on_server<R>(connection: &Connection, f: impl FnOnce(&Connection) -> Result<R>) -> Result<R> {
    let server = server_connection(connection)?;
    let result = f(&server);
    server.close();
    result
}

/// Create the database of `connection`
///
/// With `if_not_exists` an existing database is skipped; otherwise the
/// server (or the file system) reports the conflict.
pub fn create_database(connection: &Connection, if_not_exists: bool) -> Result<DatabaseChange> {
    let change = match target(connection)? {
        Target::File(path) => {
            if if_not_exists && Path::new(path).exists() {
                DatabaseChange::new(path, DatabaseOutcome::Skipped)
            } else {
                OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .io_context(format!("Failed to create database file {path}"))?;
                DatabaseChange::new(path, DatabaseOutcome::Created)
            }
        }
        Target::Server(name) => on_server(connection, |server| {
            let quoted = server.database_platform().quote_single_identifier(name);
            if if_not_exists && server.list_databases()?.iter().any(|db| db == name) {
                return Ok(DatabaseChange::new(quoted, DatabaseOutcome::Skipped));
            }
            server.create_database(&quoted)?;
            Ok(DatabaseChange::new(quoted, DatabaseOutcome::Created))
        })?,
    };

    info!(
        connection = connection.name(),
        database = %change.database,
        outcome = ?change.outcome,
        "Create database"
    );
    Ok(change)
}

/// Drop the database of `connection`
///
/// The connection's own session is closed first. With `if_exists` a
/// missing database is skipped.
pub fn drop_database(connection: &Connection, if_exists: bool) -> Result<DatabaseChange> {
    let target = target(connection)?;
    connection.close();

    let change = match target {
        Target::File(path) => {
            if if_exists && !Path::new(path).exists() {
                DatabaseChange::new(path, DatabaseOutcome::Skipped)
            } else {
                fs::remove_file(path)
                    .io_context(format!("Failed to remove database file {path}"))?;
                DatabaseChange::new(path, DatabaseOutcome::Dropped)
            }
        }
        Target::Server(name) => on_server(connection, |server| {
            let quoted = server.database_platform().quote_single_identifier(name);
            if if_exists && !server.list_databases()?.iter().any(|db| db == name) {
                return Ok(DatabaseChange::new(quoted, DatabaseOutcome::Skipped));
            }
            server.drop_database(&quoted)?;
            Ok(DatabaseChange::new(quoted, DatabaseOutcome::Dropped))
        })?,
    };

    info!(
        connection = connection.name(),
        database = %change.database,
        outcome = ?change.outcome,
        "Drop database"
    );
    Ok(change)
}
