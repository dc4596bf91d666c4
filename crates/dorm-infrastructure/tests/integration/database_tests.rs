//! Database create and drop tests

use dorm_domain::value_objects::ConnectionParams;
use dorm_infrastructure::dbal::{
    Connection, DatabaseOutcome, DbalConfiguration, create_database, drop_database,
};
use dorm_infrastructure::events::EventManager;
use dorm_providers::dbal::MemoryDriver;
use std::sync::Arc;

fn connection(params: ConnectionParams) -> (Arc<MemoryDriver>, Connection) {
    let driver = Arc::new(MemoryDriver::new());
    let connection = Connection::new(
        "default",
        params,
        driver.clone(),
        DbalConfiguration::new(),
        Arc::new(EventManager::new()),
    );
    (driver, connection)
}

#[test]
fn test_create_quotes_the_name() {
    let (driver, connection) = connection(ConnectionParams::new("memory").with_dbname("x"));

    let change = create_database(&connection, false).unwrap();

    assert_eq!(change.database, "\"x\"");
    assert_eq!(change.outcome, DatabaseOutcome::Created);
    assert_eq!(driver.statements(), vec!["CREATE DATABASE \"x\""]);
    // The statement ran on a separate session
    assert!(!connection.is_connected());
}

#[test]
fn test_create_if_not_exists_lists_databases_first() {
    let params = ConnectionParams::new("memory")
        .with_platform("mysql")
        .with_dbname("shop");
    let (driver, connection) = connection(params);

    let change = create_database(&connection, true).unwrap();

    assert_eq!(change.outcome, DatabaseOutcome::Created);
    assert_eq!(driver.statements(), vec!["SHOW DATABASES", "CREATE DATABASE `shop`"]);
}

#[test]
fn test_drop_if_exists_skips_missing_database() {
    let params = ConnectionParams::new("memory")
        .with_platform("postgresql")
        .with_dbname("shop");
    let (driver, connection) = connection(params);
    connection.execute_statement("SELECT 1").unwrap();

    let change = drop_database(&connection, true).unwrap();

    assert_eq!(change.outcome, DatabaseOutcome::Skipped);
    assert_eq!(
        driver.statements(),
        vec!["SELECT 1", "SELECT datname FROM pg_database"]
    );
    assert!(!connection.is_connected());

    drop_database(&connection, false).unwrap();
    assert_eq!(driver.statements().last().unwrap(), "DROP DATABASE \"shop\"");
}

#[test]
fn test_database_name_is_required() {
    let (_, connection) = connection(ConnectionParams::new("memory"));

    let err = create_database(&connection, false).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(drop_database(&connection, false).is_err());
}

#[test]
fn test_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.sqlite");
    let path = path.to_str().unwrap();
    let (driver, connection) = connection(ConnectionParams::new("memory").with_path(path));

    assert_eq!(
        create_database(&connection, false).unwrap().outcome,
        DatabaseOutcome::Created
    );
    assert!(create_database(&connection, false).is_err());
    assert_eq!(
        create_database(&connection, true).unwrap(),
        dorm_infrastructure::dbal::DatabaseChange {
            database: path.to_string(),
            outcome: DatabaseOutcome::Skipped,
        }
    );

    assert_eq!(
        drop_database(&connection, false).unwrap().outcome,
        DatabaseOutcome::Dropped
    );
    assert!(!std::path::Path::new(path).exists());
    assert_eq!(
        drop_database(&connection, true).unwrap().outcome,
        DatabaseOutcome::Skipped
    );
    assert!(driver.statements().is_empty());
}
