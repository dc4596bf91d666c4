//! Migration configuration and dependency tests

use crate::support::two_connections;
use dorm_infrastructure::aliases::Aliases;
use dorm_infrastructure::config::{AppConfig, MigrationConfig, OrganizeMigrations};
use dorm_infrastructure::migrations::{MigrationConfigurationFactory, MigrationTarget};
use dorm_infrastructure::{AppContext, init_app};
use std::collections::BTreeMap;
use std::sync::Arc;

fn with_migrations(migrations: Vec<MigrationConfig>) -> AppContext {
    let mut config: AppConfig = two_connections();
    config.aliases.insert("@app".to_string(), "/srv/app".to_string());
    config.migrations = migrations;
    init_app(config).unwrap()
}

#[test]
fn test_paths_are_alias_resolved() {
    let mut map = BTreeMap::new();
    map.insert("@app".to_string(), "/srv/app".to_string());
    let mut config = MigrationConfig::new("default")
        .with_path("app::migrations", "@app/migrations")
        .with_connection("default");
    config.organize_migrations = OrganizeMigrations::Year;

    let configuration = MigrationConfigurationFactory::new(Aliases::new(&map))
        .create(&config)
        .unwrap();

    assert_eq!(configuration.migrations_paths()["app::migrations"], "/srv/app/migrations");
    assert!(configuration.is_organized_by_year());
    assert!(!configuration.is_organized_by_year_and_month());
    assert!(configuration.is_transactional());
    assert!(configuration.is_database_platform_checked());
    assert_eq!(configuration.table_storage().version_column_length, 191);
}

#[test]
fn test_default_configuration_lookup() {
    let context = with_migrations(vec![
        MigrationConfig::new("default").with_connection("default"),
        MigrationConfig::new("reporting").with_connection("mysql"),
    ]);
    let registry = context.migrations();

    assert_eq!(registry.names(), vec!["default", "reporting"]);
    assert_eq!(registry.get_configuration(None).unwrap().name(), "default");
    assert!(registry.has_configuration("reporting"));

    let err = registry.get_configuration(Some("audit")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: configuration by name \"audit\"");
}

#[test]
fn test_dependencies_through_connection() {
    let context = with_migrations(vec![
        MigrationConfig::new("default")
            .with_connection("mysql")
            .with_path("app::migrations", "@app/migrations"),
    ]);

    let dependencies = context.migration_dependencies(None).unwrap();

    assert_eq!(dependencies.target(), &MigrationTarget::Connection("mysql".to_string()));
    assert_eq!(dependencies.connection().name(), "mysql");
    assert!(dependencies.entity_manager().is_none());
    assert_eq!(
        dependencies.migrations_directory(None).unwrap(),
        ("app::migrations", "/srv/app/migrations")
    );
}

#[test]
fn test_dependencies_through_entity_manager() {
    let context = with_migrations(vec![MigrationConfig::new("default").with_entity_manager("mysql")]);

    let dependencies = context.migration_dependencies(Some("default")).unwrap();
    let em = dependencies.entity_manager().unwrap();

    assert_eq!(em.name(), "mysql");
    assert!(Arc::ptr_eq(dependencies.connection(), em.connection()));
}

#[test]
fn test_exactly_one_target() {
    let context = with_migrations(vec![
        MigrationConfig::new("default"),
        MigrationConfig::new("both")
            .with_connection("default")
            .with_entity_manager("default"),
    ]);

    for name in ["default", "both"] {
        let err = context.migration_dependencies(Some(name)).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(err.to_string(), "Configuration error: Error config");
    }
}

#[test]
fn test_unknown_namespace_directory() {
    let context = with_migrations(vec![
        MigrationConfig::new("default")
            .with_connection("default")
            .with_path("app::migrations", "@app/migrations"),
    ]);
    let dependencies = context.migration_dependencies(None).unwrap();

    let err = dependencies.migrations_directory(Some("shop::migrations")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Path not defined for the namespace \"shop::migrations\""
    );
}
