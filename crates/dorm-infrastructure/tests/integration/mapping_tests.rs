//! ORM configuration factory and mapping driver tests

use crate::support::{POST, TAG, USER};
use dorm_domain::ports::orm::MappingDriver;
use dorm_infrastructure::aliases::Aliases;
use dorm_infrastructure::cache::CacheCollector;
use dorm_infrastructure::config::{EntityManagerConfig, MappingConfig, ProxyConfig};
use dorm_infrastructure::di::Injector;
use dorm_infrastructure::orm::{DqlFunctionKind, OrmConfigurationFactory};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;

fn factory_with_alias(alias: &str, path: &str) -> OrmConfigurationFactory {
    let mut map = BTreeMap::new();
    map.insert(alias.to_string(), path.to_string());
    OrmConfigurationFactory::new(
        Aliases::new(&map),
        CacheCollector::new(),
        Arc::new(Injector::new()),
    )
}

fn factory() -> OrmConfigurationFactory {
    factory_with_alias("@runtime", "/tmp/dorm")
}

fn proxies() -> ProxyConfig {
    ProxyConfig {
        path: Some("@runtime/proxies".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_proxy_settings() {
    let configuration = factory()
        .create(&EntityManagerConfig::new("default", "default"), &proxies())
        .unwrap();

    assert_eq!(configuration.proxy_dir(), "/tmp/dorm/proxies");
    assert_eq!(configuration.proxy_namespace(), "Proxy");
    assert!(configuration.auto_generate_proxies());
    assert_eq!(configuration.eager_fetch_batch_size(), 100);
}

#[test]
fn test_proxy_path_is_mandatory() {
    let err = factory()
        .create(&EntityManagerConfig::new("default", "default"), &ProxyConfig::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "Configuration error: Not found path proxies");
}

#[test]
fn test_mapping_keys_are_checked_in_order() {
    let cases = [
        (MappingConfig::default(), "Not found \"driver\" mapping"),
        (
            MappingConfig {
                driver: Some("attribute".to_string()),
                ..Default::default()
            },
            "Not found \"dir\" mapping",
        ),
        (
            MappingConfig {
                driver: Some("attribute".to_string()),
                dir: Some("src".to_string()),
                ..Default::default()
            },
            "Not found \"namespace\" mapping",
        ),
    ];

    for (mapping, expected) in cases {
        let err = factory().create_driver_chain(&[mapping]).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains(expected), "{err}");
    }
}

#[test]
fn test_unknown_mapping_kind() {
    let mappings = [MappingConfig::new("yaml", "config/doctrine", "app::entity")];
    let err = factory().create_driver_chain(&mappings).unwrap_err();

    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("yaml"));
}

#[test]
fn test_attribute_and_static_kinds() {
    let chain = factory()
        .create_driver_chain(&[
            MappingConfig::new("static_php", "src/entity", "app::entity"),
            MappingConfig::new("attribute", "src/entity", "blog::entity"),
        ])
        .unwrap();

    assert_eq!(chain.namespaces(), vec!["app::entity", "blog::entity"]);
    assert!(!chain.is_transient(USER));
    // Registered without a static loader
    assert!(chain.is_transient(POST));
    assert!(!chain.is_transient(TAG));
    assert!(chain.is_transient("shop::entity::Order"));
}

#[test]
fn test_xml_mapping() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("Invoice.orm.xml"),
        r#"<dorm-mapping>
  <entity name="billing::entity::Invoice" table="invoices">
    <id name="number" type="string"/>
    <field name="totalAmount" type="decimal" nullable="true"/>
    <entity-listeners>
      <entity-listener class="billing::listener::InvoiceListener"/>
    </entity-listeners>
  </entity>
</dorm-mapping>"#,
    )
    .unwrap();

    let factory = factory_with_alias("@billing", &dir.path().display().to_string());
    let config = EntityManagerConfig::new("billing", "default").with_mapping(MappingConfig::new(
        "xml",
        "@billing",
        "billing::entity",
    ));
    let configuration = factory.create(&config, &proxies_at(&dir)).unwrap();
    let chain = configuration.metadata_driver();

    assert_eq!(chain.all_class_names().unwrap(), vec!["billing::entity::Invoice"]);
    assert!(!chain.is_transient("billing::entity::Invoice"));
    assert!(chain.is_transient("billing::entity::Receipt"));
}

fn proxies_at(dir: &TempDir) -> ProxyConfig {
    ProxyConfig {
        path: Some(dir.path().join("proxies").display().to_string()),
        ..Default::default()
    }
}

#[test]
fn test_declarative_mapping_with_custom_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("crm.entity.Contact.map.toml"),
        r#"
table = "contacts"

[[fields]]
field = "id"
type_name = "integer"
id = true

[[fields]]
field = "fullName"
"#,
    )
    .unwrap();

    let factory = factory_with_alias("@crm", &dir.path().display().to_string());
    let chain = factory
        .create_driver_chain(&[MappingConfig::new("php", "@crm", "crm::entity")
            .with_file_extension(".map.toml")])
        .unwrap();

    assert_eq!(chain.all_class_names().unwrap(), vec!["crm::entity::Contact"]);
    assert!(!chain.is_transient("crm::entity::Contact"));
}

#[test]
fn test_hooks_and_tuning() {
    let mut config = EntityManagerConfig::new("default", "default")
        .with_naming_strategy("orm.naming.underscore")
        .with_filter("soft_delete", "app.filter.soft_delete");
    config.quote_strategy = Some("orm.quote.ansi".to_string());
    config
        .dql
        .custom_string_functions
        .insert("SOUNDEX".to_string(), "app.dql.soundex".to_string());
    config
        .custom_hydration_modes
        .insert("flat".to_string(), "app.hydrator.flat".to_string());
    config.fetch_mode_sub_select_batch_size = Some(25);
    config
        .default_query_hints
        .insert("fetch_partial".to_string(), json!(true));
    config.schema_ignore_classes = vec!["app::entity::Legacy".to_string()];

    let configuration = factory().create(&config, &proxies()).unwrap();

    assert_eq!(
        configuration
            .naming_strategy()
            .class_to_table_name("app::entity::BlogPost"),
        "blog_post"
    );
    assert_eq!(
        configuration.custom_function(DqlFunctionKind::String, "soundex"),
        Some("app.dql.soundex")
    );
    assert_eq!(configuration.custom_hydration_mode("flat"), Some("app.hydrator.flat"));
    assert_eq!(configuration.filter_component("soft_delete"), Some("app.filter.soft_delete"));
    assert_eq!(configuration.eager_fetch_batch_size(), 25);
    assert_eq!(configuration.default_query_hints()["fetch_partial"], json!(true));
    assert_eq!(configuration.schema_ignore_classes(), ["app::entity::Legacy"]);
}

#[test]
fn test_hook_with_wrong_capability() {
    let mut config = EntityManagerConfig::new("default", "default");
    config.repository_factory = Some("orm.naming.default".to_string());

    let err = factory().create(&config, &proxies()).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("orm.naming.default"));
}
