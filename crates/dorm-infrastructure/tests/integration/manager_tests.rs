//! Doctrine manager registry tests

use crate::support::{POST, TAG, USER, attribute_manager, memory_connection, two_connections};
use dorm_domain::value_objects::ConnectionParams;
use dorm_infrastructure::config::{DbalConfig, EntityManagerConfig};
use dorm_infrastructure::init_app;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_named_connections_and_managers() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();

    assert_eq!(manager.connection_names(), vec!["default", "mysql"]);
    assert_eq!(manager.manager_names(), vec!["default", "mysql"]);

    let mysql = manager.get_connection(Some("mysql")).unwrap();
    let em = manager.get_manager(Some("mysql")).unwrap();
    assert!(Arc::ptr_eq(em.connection(), &mysql));
    assert_eq!(mysql.database_platform().name(), "mysql");
}

#[test]
fn test_lookup_without_name_uses_default() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();

    assert_eq!(manager.default_connection_name(), "default");
    assert_eq!(manager.default_manager_name(), "default");
    assert!(Arc::ptr_eq(
        &manager.get_connection(None).unwrap(),
        &manager.get_connection(Some("default")).unwrap()
    ));
    assert_eq!(manager.get_manager(None).unwrap().name(), "default");
}

#[test]
fn test_missing_entries_are_not_found() {
    let context = init_app(two_connections()).unwrap();
    let err = context.manager().get_connection(Some("oracle")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: Connection \"oracle\"");
    assert!(context.manager().get_manager(Some("oracle")).unwrap_err().is_not_found());
}

#[test]
fn test_duplicate_connection_keeps_original() {
    let mut context = init_app(two_connections()).unwrap();
    let original = context.manager().get_connection(Some("mysql")).unwrap();

    let err = context.add_connection(&memory_connection("mysql")).unwrap_err();

    assert!(err.is_duplicate_name());
    assert_eq!(err.to_string(), "Connection \"mysql\" already exist");
    assert!(Arc::ptr_eq(
        &original,
        &context.manager().get_connection(Some("mysql")).unwrap()
    ));
}

#[test]
fn test_direct_add_rejects_duplicates() {
    let mut context = init_app(two_connections()).unwrap();
    let existing = context.manager().get_manager(Some("default")).unwrap();

    let err = context
        .manager_mut()
        .add_manager("default", Arc::clone(&existing))
        .unwrap_err();
    assert_eq!(err.to_string(), "Entity manager \"default\" already exist");
}

#[test]
fn test_dynamic_registration() {
    let mut context = init_app(two_connections()).unwrap();

    let connection = context.add_connection(&memory_connection("reporting")).unwrap();
    let em = context
        .add_entity_manager(&attribute_manager("reporting", "reporting", "app::entity"))
        .unwrap();

    assert!(Arc::ptr_eq(em.connection(), &connection));
    assert!(context.manager().has_connection("reporting"));
    assert!(context.manager().has_manager("reporting"));
    assert!(
        context
            .add_entity_manager(&EntityManagerConfig::new("reporting", "reporting"))
            .unwrap_err()
            .is_duplicate_name()
    );
}

#[test]
fn test_missing_params_constructs_nothing() {
    let mut context = init_app(two_connections()).unwrap();
    let config = DbalConfig {
        name: "broken".to_string(),
        ..Default::default()
    };

    let err = context.add_connection(&config).unwrap_err();

    assert!(err.is_configuration_error());
    assert_eq!(err.to_string(), "Configuration error: Not found \"params\" connection");
    assert!(!context.manager().has_connection("broken"));
}

#[test]
fn test_unknown_driver_is_configuration_error() {
    let mut context = init_app(two_connections()).unwrap();
    let config = DbalConfig::new("oracle", ConnectionParams::new("oci8"));
    assert!(context.add_connection(&config).unwrap_err().is_configuration_error());
}

#[test]
fn test_close_connection_removes_it() {
    let mut context = init_app(two_connections()).unwrap();
    let connection = context.manager().get_connection(Some("mysql")).unwrap();
    connection.connect().unwrap();

    context.manager_mut().close_connection("mysql").unwrap();

    assert!(!connection.is_connected());
    assert!(
        context
            .manager()
            .get_connection(Some("mysql"))
            .unwrap_err()
            .is_not_found()
    );
    assert!(context.manager_mut().close_connection("mysql").unwrap_err().is_not_found());
}

#[test]
fn test_close_manager_removes_it() {
    let mut context = init_app(two_connections()).unwrap();
    let em = context.manager().get_manager(Some("mysql")).unwrap();

    context.manager_mut().close_manager("mysql").unwrap();

    assert!(!em.is_open());
    assert_eq!(context.manager().manager_names(), vec!["default"]);
}

#[test]
fn test_flush_and_reset() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();
    let em = manager.get_manager(None).unwrap();

    em.persist(USER, json!({ "id": 1, "emailAddress": "a@example.com" })).unwrap();
    assert_eq!(manager.flush_manager(None).unwrap(), 1);
    assert_eq!(manager.flush_all_managers().unwrap(), 0);
    assert!(em.contains(USER, "1"));

    let reset = manager.reset_manager(None).unwrap();
    assert!(Arc::ptr_eq(&reset, &em));
    assert!(!em.contains(USER, "1"));
}

#[test]
fn test_reset_all_keeps_names() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();
    for (_, em) in manager.managers() {
        em.persist(USER, json!({ "id": 7 })).unwrap();
    }

    manager.reset_all_managers().unwrap();

    assert_eq!(manager.manager_names(), vec!["default", "mysql"]);
    for (_, em) in manager.managers() {
        assert!(em.identity_map().is_empty());
        assert!(em.is_open());
    }
}

#[test]
fn test_manager_for_class_scans_in_registration_order() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();

    assert_eq!(manager.get_manager_for_class(USER).unwrap().name(), "default");
    assert_eq!(manager.get_manager_for_class(POST).unwrap().name(), "default");
    assert_eq!(manager.get_manager_for_class(TAG).unwrap().name(), "mysql");
}

#[test]
fn test_manager_for_proxy_class() {
    let context = init_app(two_connections()).unwrap();
    let em = context
        .manager()
        .get_manager_for_class("Proxy::__CG__::blog::entity::Tag")
        .unwrap();
    assert_eq!(em.name(), "mysql");
}

#[test]
fn test_no_manager_for_unmapped_or_anonymous_class() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();

    assert!(manager.get_manager_for_class("shop::entity::Order").is_none());
    assert!(manager.get_manager_for_class("app::entity::{{closure}}").is_none());
    assert!(manager.get_manager_for_class("").is_none());
}

#[test]
fn test_repository_lookup() {
    let context = init_app(two_connections()).unwrap();
    let manager = context.manager();
    manager
        .get_manager(Some("mysql"))
        .unwrap()
        .persist(TAG, json!({ "slug": "rust" }))
        .unwrap();

    let tags = manager.get_repository(TAG, None).unwrap();
    assert_eq!(tags.class_name(), TAG);
    assert_eq!(tags.find("rust"), Some(json!({ "slug": "rust" })));

    // An explicit manager name wins over class ownership
    let users = manager.get_repository(USER, Some("mysql")).unwrap();
    assert!(users.find_all().is_empty());
    assert_eq!(users.metadata().table, "users");
}

#[test]
fn test_providers_read_the_registry() {
    let context = init_app(two_connections()).unwrap();
    assert_eq!(context.connection_provider().get(None).unwrap().name(), "default");
    assert_eq!(
        context
            .entity_manager_provider()
            .get(Some("mysql"))
            .unwrap()
            .name(),
        "mysql"
    );
    assert!(context.connection_provider().get(Some("nope")).is_err());
}
