//! Tests for the link-time registries
//!
//! Uses `extern crate dorm_providers` to force linkme registration of the
//! real providers, then resolves them by name.

// Force linkme registration of all providers from dorm-providers
extern crate dorm_providers;

use dorm_application::ports::registry::*;
use dorm_domain::ports::cache::{CacheEntryConfig, CacheProvider};
use dorm_domain::ports::orm::NamingStrategy;
use dorm_domain::value_objects::{ClassMetadataBuilder, ConnectionParams, FieldMapping};

// ============================================================================
// Cache Registry Tests
// ============================================================================

mod cache_registry_tests {
    use super::*;

    #[test]
    fn test_list_includes_builtin_backends() {
        let providers = list_cache_providers();

        for name in ["null", "file"] {
            assert!(
                providers.iter().any(|(n, _)| *n == name),
                "{name} should be registered. Available: {providers:?}"
            );
        }
        assert!(is_cache_provider_registered("null"));
        assert!(!is_cache_provider_registered("xcache"));
    }

    #[test]
    fn test_resolve_null_cache_provider() {
        let provider = resolve_cache_provider(&CacheProviderConfig::new("null")).unwrap();

        provider
            .set_json("key", "\"value\"", CacheEntryConfig::new())
            .unwrap();
        assert_eq!(provider.get_json("key").unwrap(), None);
        assert_eq!(provider.provider_name(), "null");
    }

    #[test]
    fn test_resolve_unknown_cache_provider_fails() {
        let err = resolve_cache_provider(&CacheProviderConfig::new("xcache"))
            .err()
            .unwrap();

        assert!(err.contains("Unknown cache provider"));
        assert!(err.contains("null"));
    }

    #[test]
    fn test_resolve_array_cache_provider() {
        let provider = resolve_cache_provider(&CacheProviderConfig::new("array")).unwrap();

        provider.set_json("key", "1", CacheEntryConfig::new()).unwrap();
        assert_eq!(provider.get_json("key").unwrap().as_deref(), Some("1"));
        assert_eq!(provider.provider_name(), "array");
    }
}

// ============================================================================
// Driver Registry Tests
// ============================================================================

mod driver_registry_tests {
    use super::*;

    #[test]
    fn test_memory_driver_registered() {
        let drivers = list_drivers();
        assert!(drivers.iter().any(|(name, _)| *name == "memory"));
    }

    #[test]
    fn test_resolve_memory_driver() {
        let params = ConnectionParams::new("memory").with_platform("postgresql");
        let driver = resolve_driver(&params).unwrap();

        assert_eq!(driver.name(), "memory");
        assert_eq!(driver.database_platform(&params).name(), "postgresql");
    }

    #[test]
    fn test_resolve_unknown_driver_fails() {
        let result = resolve_driver(&ConnectionParams::new("ibm_db2"));
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_matches_aliases() {
        let entry = DATABASE_DRIVERS
            .iter()
            .find(|e| e.name == "memory")
            .unwrap();

        assert!(entry.matches("memory"));
        assert!(entry.matches("in_memory"));
        assert!(!entry.matches("pdo_mysql"));
    }
}

// ============================================================================
// Component Registry Tests
// ============================================================================

mod component_registry_tests {
    use super::*;

    #[test]
    fn test_find_registered_component() {
        let entry = find_component("orm.naming.underscore").unwrap();
        let component = (entry.factory)();

        let naming = component.get::<dyn NamingStrategy>().unwrap();
        assert_eq!(naming.class_to_table_name("app::UserGroup"), "user_group");
    }

    #[test]
    fn test_unknown_component_is_none() {
        assert!(find_component("orm.naming.klingon").is_none());
    }

    #[test]
    fn test_component_names_are_unique() {
        let mut names: Vec<_> = list_components().into_iter().map(|(n, _)| n).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), total);
    }
}

// ============================================================================
// Entity Registry Tests
// ============================================================================

mod entity_registry_tests {
    use super::*;

    #[linkme::distributed_slice(ENTITIES)]
    static TAG: EntityEntry = EntityEntry {
        class: "registry_test::entity::Tag",
        table: Some("tags"),
        load_metadata: Some(|builder: &mut ClassMetadataBuilder| {
            builder.field(FieldMapping::new("id").type_name("integer").id());
        }),
    };

    #[test]
    fn test_entity_is_discoverable() {
        assert!(list_entities().contains(&"registry_test::entity::Tag"));

        let entry = find_entity("registry_test::entity::Tag").unwrap();
        assert_eq!(entry.table, Some("tags"));
    }

    #[test]
    fn test_static_loader_fills_builder() {
        let entry = find_entity("registry_test::entity::Tag").unwrap();
        let mut builder = ClassMetadataBuilder::new(entry.class);

        if let Some(load) = entry.load_metadata {
            load(&mut builder);
        }
        assert_eq!(builder.fields_mut().len(), 1);
        assert!(builder.fields_mut()[0].id);
    }
}
