//! Component injector tests

use dorm_application::ports::registry::Component;
use dorm_domain::error::Error;
use dorm_domain::ports::dbal::{DbalType, Middleware};
use dorm_domain::ports::orm::NamingStrategy;
use dorm_infrastructure::di::Injector;
use dorm_providers::orm::UnderscoreNamingStrategy;
use std::sync::Arc;

#[test]
fn test_linked_component_is_resolved() {
    let injector = Injector::new();
    let naming = injector
        .make::<dyn NamingStrategy>("orm.naming.underscore")
        .unwrap();
    assert_eq!(naming.class_to_table_name("app::entity::BlogPost"), "blog_post");
}

#[test]
fn test_missing_capability_is_mismatch() {
    let err = Injector::new()
        .make::<dyn Middleware>("orm.naming.default")
        .err().unwrap();

    match &err {
        Error::CapabilityMismatch { component, .. } => {
            assert_eq!(component, "orm.naming.default");
        }
        other => panic!("Expected CapabilityMismatch, got {other:?}"),
    }
    assert!(err.to_string().contains("not instance of"));
}

#[test]
fn test_unknown_component_is_configuration_error() {
    let injector = Injector::new();
    assert!(!injector.has("app.nothing"));
    assert!(injector.make::<dyn DbalType>("app.nothing").unwrap_err().is_configuration_error());
}

#[test]
fn test_binding_overrides_linked_component() {
    let injector = Injector::new();
    injector.bind("orm.naming.default", || {
        Component::new().provide::<dyn NamingStrategy>(Arc::new(UnderscoreNamingStrategy::default()))
    });

    let naming = injector
        .make::<dyn NamingStrategy>("orm.naming.default")
        .unwrap();
    assert_eq!(naming.property_to_column_name("createdAt", "app::User"), "created_at");
}

#[test]
fn test_make_optional() {
    let injector = Injector::new();
    assert!(injector.make_optional::<dyn NamingStrategy>(None).unwrap().is_none());
    assert!(
        injector
            .make_optional::<dyn NamingStrategy>(Some("orm.naming.default"))
            .unwrap()
            .is_some()
    );
}
