//! Type registry and DBAL configuration tests

use dorm_domain::ports::dbal::DbalType;
use dorm_domain::value_objects::ConnectionParams;
use dorm_infrastructure::config::DbalConfig;
use dorm_infrastructure::dbal::{DbalConfigurationFactory, TypeRegistry};
use dorm_infrastructure::di::Injector;
use dorm_providers::dbal::UuidType;
use std::sync::Arc;

#[test]
fn test_builtin_types_are_registered() {
    let types = TypeRegistry::new();
    assert!(types.has_type("integer"));
    assert!(types.has_type("json"));
    assert!(!types.has_type("uuid"));
}

#[test]
fn test_add_type_is_idempotent() {
    let types = TypeRegistry::new();
    assert!(types.add_type("uuid", Arc::new(UuidType)));
    assert!(!types.add_type("uuid", Arc::new(UuidType)));
    assert_eq!(types.names().iter().filter(|n| *n == "uuid").count(), 1);
}

#[test]
fn test_unknown_type_is_not_found() {
    assert!(TypeRegistry::new().get_type("money").unwrap_err().is_not_found());
}

#[test]
fn test_dbal_configuration_defaults() {
    let factory = DbalConfigurationFactory::new(Arc::new(Injector::new()));
    let configuration = factory
        .create(&DbalConfig::new("default", ConnectionParams::new("memory")))
        .unwrap();

    assert!(configuration.auto_commit());
    assert!(configuration.middlewares().is_empty());
    assert!(configuration.schema_assets_filter().is_none());
    assert_eq!(
        configuration.type_comment(&UuidType).as_deref(),
        Some("(DC2Type:uuid)")
    );
}

#[test]
fn test_dbal_configuration_from_block() {
    let factory = DbalConfigurationFactory::new(Arc::new(Injector::new()));
    let mut config = DbalConfig::new("default", ConnectionParams::new("memory"))
        .with_auto_commit(false)
        .with_middleware("dbal.middleware.logging")
        .with_schema_assets_filter("^app_");
    config.disable_type_comments = Some(true);

    let configuration = factory.create(&config).unwrap();
    let filter = configuration.schema_assets_filter().unwrap();

    assert!(!configuration.auto_commit());
    assert_eq!(configuration.middlewares().len(), 1);
    assert!(filter("app_users"));
    assert!(!filter("legacy_users"));
    assert!(configuration.type_comment(&UuidType).is_none());
}

#[test]
fn test_invalid_schema_filter() {
    let factory = DbalConfigurationFactory::new(Arc::new(Injector::new()));
    let config = DbalConfig::new("default", ConnectionParams::new("memory"))
        .with_schema_assets_filter("([unclosed");
    assert!(factory.create(&config).unwrap_err().is_configuration_error());
}

#[test]
fn test_middleware_must_be_middleware() {
    let factory = DbalConfigurationFactory::new(Arc::new(Injector::new()));
    let config = DbalConfig::new("default", ConnectionParams::new("memory"))
        .with_middleware("orm.naming.default");
    assert!(factory.create(&config).unwrap_err().is_configuration_error());
}
