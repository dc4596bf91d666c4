//! Connection factory and connection lifecycle tests

use crate::support::{Recorder, memory_connection};
use dorm_domain::events::POST_CONNECT;
use dorm_domain::ports::events::EventListener;
use dorm_domain::value_objects::ConnectionParams;
use dorm_infrastructure::config::{DbalConfig, EventsConfig};
use dorm_infrastructure::dbal::{Connection, ConnectionFactory, DbalConfiguration, TypeRegistry};
use dorm_infrastructure::di::Injector;
use dorm_infrastructure::events::EventManager;
use dorm_providers::dbal::MemoryDriver;
use std::sync::Arc;

fn factory() -> ConnectionFactory {
    ConnectionFactory::new(Arc::new(Injector::new()), Arc::new(TypeRegistry::new()))
}

#[test]
fn test_connection_is_lazy() {
    let connection = factory().create(&memory_connection("default")).unwrap();
    assert!(!connection.is_connected());

    connection.execute_statement("SELECT 1").unwrap();

    assert!(connection.is_connected());
    assert!(!connection.connect().unwrap());
}

#[test]
fn test_server_version() {
    let connection = factory().create(&memory_connection("default")).unwrap();
    assert_eq!(connection.server_version().unwrap(), "memory");

    let hinted = DbalConfig::new(
        "hinted",
        ConnectionParams::new("memory").with_server_version("8.0.36"),
    );
    let connection = factory().create(&hinted).unwrap();
    assert_eq!(connection.server_version().unwrap(), "8.0.36");
    assert!(!connection.is_connected());
}

#[test]
fn test_transaction_nesting() {
    let connection = factory().create(&memory_connection("default")).unwrap();

    connection.begin_transaction().unwrap();
    connection.begin_transaction().unwrap();
    assert_eq!(connection.transaction_nesting_level(), 2);

    connection.commit().unwrap();
    assert!(connection.is_transaction_active());
    connection.roll_back().unwrap();
    assert!(!connection.is_transaction_active());

    assert!(connection.commit().is_err());
}

#[test]
fn test_auto_commit_off_keeps_a_transaction_open() {
    let config = memory_connection("default").with_auto_commit(false);
    let connection = factory().create(&config).unwrap();
    assert!(!connection.is_auto_commit());

    connection.connect().unwrap();
    assert_eq!(connection.transaction_nesting_level(), 1);

    connection.commit().unwrap();
    assert_eq!(connection.transaction_nesting_level(), 1);
}

#[test]
fn test_close_rolls_back_open_transaction() {
    let driver = Arc::new(MemoryDriver::new());
    let mut configuration = DbalConfiguration::new();
    configuration.set_auto_commit(false);
    let connection = Connection::new(
        "default",
        ConnectionParams::new("memory"),
        driver.clone(),
        configuration,
        Arc::new(EventManager::new()),
    );

    connection.execute_statement("INSERT INTO users VALUES (1)").unwrap();
    connection.close();

    assert!(!connection.is_connected());
    assert!(!connection.is_transaction_active());
    assert_eq!(
        driver.statements(),
        vec!["BEGIN", "INSERT INTO users VALUES (1)", "ROLLBACK"]
    );

    // Without an open transaction nothing is sent
    connection.close();
    assert_eq!(driver.statements().len(), 3);
}

#[test]
fn test_post_connect_listener() {
    let injector = Arc::new(Injector::new());
    let recorder = Arc::new(Recorder::default());
    injector.bind_instance::<dyn EventListener>("app.connect_listener", recorder.clone());

    let config = memory_connection("default")
        .with_events(EventsConfig::default().with_listener(POST_CONNECT, "app.connect_listener"));
    let connection = ConnectionFactory::new(injector, Arc::new(TypeRegistry::new()))
        .create(&config)
        .unwrap();

    connection.connect().unwrap();
    connection.connect().unwrap();
    assert_eq!(recorder.seen(), vec![POST_CONNECT]);
}

#[test]
fn test_middleware_wraps_driver() {
    let config = memory_connection("default").with_middleware("dbal.middleware.logging");
    let connection = factory().create(&config).unwrap();

    assert_eq!(connection.driver().name(), "memory");
    assert_eq!(connection.execute_statement("DELETE FROM users").unwrap(), 0);
}

#[test]
fn test_custom_types_are_registered_once() {
    let types = Arc::new(TypeRegistry::new());
    let factory = ConnectionFactory::new(Arc::new(Injector::new()), Arc::clone(&types));
    let config = memory_connection("default")
        .with_custom_type("uuid", "dbal.type.uuid")
        .with_mapping_type("enum", "string");

    let first = factory.create(&config).unwrap();
    let second = factory
        .create(&DbalConfig { name: "replica".to_string(), ..config.clone() })
        .unwrap();

    assert!(types.has_type("uuid"));
    assert_eq!(types.names().iter().filter(|name| *name == "uuid").count(), 1);
    for connection in [first, second] {
        let platform = connection.database_platform();
        assert_eq!(platform.type_mapping("uuid").as_deref(), Some("uuid"));
        assert_eq!(platform.type_mapping("enum").as_deref(), Some("string"));
    }
}

#[test]
fn test_custom_type_must_be_a_type() {
    let config = memory_connection("default").with_custom_type("money", "orm.naming.default");
    assert!(factory().create(&config).unwrap_err().is_configuration_error());
}

#[test]
fn test_schema_manager_applies_filter() {
    let config = memory_connection("default").with_schema_assets_filter("^app_");
    let connection = factory().create(&config).unwrap();

    let schema = connection.create_schema_manager();
    let names = vec!["app_users".to_string(), "sessions".to_string()];

    assert_eq!(schema.filter_asset_names(&names), vec!["app_users"]);
    assert_eq!(schema.platform().name(), "sqlite");
}
