//! Bootstrap tests

use crate::support::{attribute_manager, memory_connection, two_connections};
use dorm_infrastructure::config::{ConfigBuilder, ConfigLoader, EntityManagerConfig};
use dorm_infrastructure::init_app;
use tempfile::TempDir;

#[test]
fn test_empty_configuration() {
    let context = init_app(ConfigBuilder::new().build()).unwrap();
    assert!(context.manager().connection_names().is_empty());
    assert!(context.migrations().is_empty());
    assert!(context.manager().get_connection(None).unwrap_err().is_not_found());
}

#[test]
fn test_context_exposes_shared_state() {
    let context = init_app(two_connections()).unwrap();

    assert!(context.types().has_type("integer"));
    assert_eq!(context.caches().metadata().provider_name(), "null");
    assert!(format!("{context:?}").contains("mysql"));
    assert_eq!(context.config.default_connection, "default");
}

#[test]
fn test_bootstrap_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dorm.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[aliases]
"@var" = "{var}"

[[dbal]]
name = "default"

[dbal.params]
driver = "memory"

[orm.proxies]
path = "@var/proxies"

[[orm.entity_managers]]
name = "default"
connection = "default"

[[orm.entity_managers.mappings]]
driver = "attribute"
dir = "src/entity"
namespace = "app::entity"

[cache.metadata]
driver = "file"
path = "@var/cache"
"#,
            var = dir.path().display()
        ),
    )
    .unwrap();

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    let context = init_app(config).unwrap();
    let em = context.manager().get_manager(None).unwrap();

    assert_eq!(em.connection().name(), "default");
    assert_eq!(
        em.configuration().proxy_dir(),
        dir.path().join("proxies").display().to_string()
    );
    assert_eq!(context.caches().metadata().provider_name(), "file");
}

#[test]
fn test_missing_proxy_path_aborts() {
    let config = ConfigBuilder::new()
        .with_connection(memory_connection("default"))
        .with_entity_manager(attribute_manager("default", "default", "app::entity"))
        .build();

    let err = init_app(config).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_manager_on_unknown_connection_aborts() {
    let config = ConfigBuilder::new()
        .with_connection(memory_connection("default"))
        .with_entity_manager(EntityManagerConfig::new("default", "analytics"))
        .with_proxy_path("/tmp/dorm/proxies")
        .build();

    assert!(init_app(config).unwrap_err().is_not_found());
}

#[test]
fn test_manager_without_connection_is_rejected() {
    let config = ConfigBuilder::new()
        .with_connection(memory_connection("default"))
        .with_entity_manager(EntityManagerConfig {
            name: "default".to_string(),
            ..Default::default()
        })
        .with_proxy_path("/tmp/dorm/proxies")
        .build();

    let err = init_app(config).unwrap_err();
    assert!(err.is_configuration_error());
    assert_eq!(
        err.to_string(),
        "Configuration error: Not found param \"connection\" on entity manager \"default\""
    );
}
