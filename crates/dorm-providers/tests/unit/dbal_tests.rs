//! DBAL provider tests

use dorm_application::ports::registry::{find_component, resolve_driver};
use dorm_domain::ports::dbal::{DbalType, Driver, Middleware, SchemaManagerFactory};
use dorm_domain::value_objects::ConnectionParams;
use dorm_providers::dbal::{LoggingMiddleware, MemoryDriver};
use std::sync::Arc;

#[test]
fn test_memory_driver_resolves_by_alias() {
    let driver = resolve_driver(&ConnectionParams::new("in_memory")).unwrap();
    assert_eq!(driver.name(), "memory");
}

#[test]
fn test_unknown_driver_lists_available() {
    let err = resolve_driver(&ConnectionParams::new("oci8")).err().unwrap();
    assert!(err.contains("oci8"));
    assert!(err.contains("memory"));
}

#[test]
fn test_logging_middleware_passes_through() {
    let inner = Arc::new(MemoryDriver::new());
    let wrapped = LoggingMiddleware.wrap(Arc::clone(&inner) as Arc<dyn Driver>);
    let params = ConnectionParams::new("memory").with_server_version("15.2");

    let mut conn = wrapped.connect(&params).unwrap();
    conn.execute_statement("DELETE FROM users").unwrap();

    assert_eq!(wrapped.name(), "memory");
    assert_eq!(conn.server_version().unwrap(), "15.2");
    assert_eq!(inner.statements(), vec!["DELETE FROM users"]);
}

#[test]
fn test_dbal_components_are_registered() {
    let middleware = find_component("dbal.middleware.logging").unwrap();
    assert!((middleware.factory)().provides::<dyn Middleware>());

    let schema = find_component("dbal.schema_manager_factory.default").unwrap();
    assert!((schema.factory)().provides::<dyn SchemaManagerFactory>());

    let uuid = find_component("dbal.type.uuid").unwrap();
    let uuid = (uuid.factory)().get::<dyn DbalType>().unwrap();
    assert_eq!(uuid.name(), "uuid");
}

#[cfg(feature = "driver-postgres")]
#[test]
fn test_postgres_driver_is_lazy() {
    let params = ConnectionParams::new("pgsql")
        .with_host("127.0.0.1")
        .with_port(1)
        .with_dbname("app");

    let driver = resolve_driver(&params).unwrap();
    assert_eq!(driver.name(), "pdo_pgsql");
    assert_eq!(driver.database_platform(&params).name(), "postgresql");
}
