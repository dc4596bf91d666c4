//! Cache selection tests

use dorm_domain::ports::cache::{CacheEntryConfig, CacheProviderExt};
use dorm_infrastructure::aliases::Aliases;
use dorm_infrastructure::cache::{CacheCollector, CacheFactory, CacheRole};
use dorm_infrastructure::config::{CacheConfig, CacheRoleConfig};
use std::collections::BTreeMap;
use tempfile::TempDir;

#[test]
fn test_absent_driver_is_null() {
    let provider = CacheFactory::default()
        .create(&CacheRoleConfig::default())
        .unwrap();
    assert_eq!(provider.provider_name(), "null");
}

#[test]
fn test_unknown_driver_falls_back_to_null() {
    let provider = CacheFactory::default()
        .create(&CacheRoleConfig::new("wincache"))
        .unwrap();
    assert_eq!(provider.provider_name(), "null");
}

#[test]
fn test_file_driver_requires_path() {
    let err = CacheFactory::default()
        .create(&CacheRoleConfig::new("file"))
        .unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("Not found path cache dir"));
}

#[test]
fn test_redis_driver_requires_server() {
    let err = CacheFactory::default()
        .create(&CacheRoleConfig::new("redis"))
        .unwrap_err();
    assert!(err.to_string().contains("Not found redis host"));
}

#[test]
fn test_file_driver_resolves_alias() {
    let dir = TempDir::new().unwrap();
    let mut map = BTreeMap::new();
    map.insert("@cache".to_string(), dir.path().display().to_string());

    let provider = CacheFactory::new(Aliases::new(&map))
        .create(&CacheRoleConfig::new("file").with_path("@cache/metadata"))
        .unwrap();
    provider
        .set("answer", &42_u32, CacheEntryConfig::new())
        .unwrap();

    assert_eq!(provider.provider_name(), "file");
    assert_eq!(provider.get::<u32>("answer").unwrap(), Some(42));
}

#[test]
fn test_array_driver_stores_values() {
    let provider = CacheFactory::default()
        .create(&CacheRoleConfig::new("array").with_namespace("test_"))
        .unwrap();
    provider
        .set("key", &"value".to_string(), CacheEntryConfig::new())
        .unwrap();
    assert_eq!(provider.get::<String>("key").unwrap().as_deref(), Some("value"));
}

#[test]
fn test_collector_defaults_roles_to_null() {
    let config = CacheConfig {
        metadata: Some(CacheRoleConfig::new("array")),
        ..Default::default()
    };
    let collector = CacheCollector::from_config(&config, &CacheFactory::default()).unwrap();

    assert_eq!(collector.metadata().provider_name(), "array");
    for role in [CacheRole::Hydration, CacheRole::Query, CacheRole::Result] {
        assert_eq!(collector.get(role).provider_name(), "null");
    }
}

#[test]
fn test_cache_role_names() {
    assert_eq!(CacheRole::parse("metadata"), Some(CacheRole::Metadata));
    assert_eq!(CacheRole::parse("second_level"), None);
    assert_eq!(CacheRole::Result.to_string(), "result");
}
