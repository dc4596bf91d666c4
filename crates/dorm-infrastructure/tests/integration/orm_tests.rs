//! Entity manager tests

use crate::support::{
    ORDER_LINE, POST, Recorder, TAG, USER, attribute_manager, memory_connection,
};
use dorm_domain::events::{
    LOAD_CLASS_METADATA, ON_CLEAR, ON_FLUSH, POST_FLUSH, PRE_FLUSH, PRE_PERSIST,
};
use dorm_domain::ports::cache::CacheProvider;
use dorm_domain::ports::events::EventListener;
use dorm_infrastructure::config::{CacheConfig, CacheRoleConfig, ConfigBuilder, EventsConfig};
use dorm_infrastructure::di::Injector;
use dorm_infrastructure::{init_app, init_app_with_injector};
use serde_json::json;
use std::sync::Arc;

fn single_manager() -> ConfigBuilder {
    ConfigBuilder::new()
        .with_connection(memory_connection("default"))
        .with_proxy_path("/tmp/dorm/proxies")
}

#[test]
fn test_persist_find_flush() {
    let context = init_app(
        single_manager()
            .with_entity_manager(attribute_manager("default", "default", "app::entity"))
            .build(),
    )
    .unwrap();
    let em = context.manager().get_manager(None).unwrap();

    let id = em
        .persist(USER, json!({ "id": 42, "emailAddress": "ada@example.com" }))
        .unwrap();

    assert_eq!(id, "42");
    assert_eq!(em.scheduled_count(), 1);
    assert_eq!(
        em.find(USER, "42").unwrap(),
        Some(json!({ "id": 42, "emailAddress": "ada@example.com" }))
    );
    assert_eq!(em.flush().unwrap(), 1);
    assert_eq!(em.scheduled_count(), 0);
    assert!(em.contains(USER, "42"));
}

#[test]
fn test_persist_rejects_unmapped_class() {
    let context = init_app(
        single_manager()
            .with_entity_manager(attribute_manager("default", "default", "app::entity"))
            .build(),
    )
    .unwrap();
    let em = context.manager().get_manager(None).unwrap();

    assert!(em.persist(TAG, json!({ "slug": "rust" })).is_err());
    // Mapped, but without an identifier
    assert!(em.persist(POST, json!({ "title": "Hello" })).is_err());
    assert!(em.persist(USER, json!({ "emailAddress": "x" })).is_err());
    assert!(em.identity_map().is_empty());
}

#[test]
fn test_composite_identifiers_do_not_collide() {
    let context = init_app(
        single_manager()
            .with_entity_manager(attribute_manager("default", "default", "shop::entity"))
            .build(),
    )
    .unwrap();
    let em = context.manager().get_manager(None).unwrap();

    let first = em
        .persist(ORDER_LINE, json!({ "order": "a b", "sku": "c" }))
        .unwrap();
    let second = em
        .persist(ORDER_LINE, json!({ "order": "a", "sku": "b c" }))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(first, r#"["a b","c"]"#);
    assert_eq!(em.identity_map().len(), 2);
    assert_eq!(
        em.find(ORDER_LINE, &second).unwrap(),
        Some(json!({ "order": "a", "sku": "b c" }))
    );
}

#[test]
fn test_closed_manager_rejects_work() {
    let context = init_app(
        single_manager()
            .with_entity_manager(attribute_manager("default", "default", "app::entity"))
            .build(),
    )
    .unwrap();
    let em = context.manager().get_manager(None).unwrap();
    em.close().unwrap();

    let err = em.persist(USER, json!({ "id": 1 })).unwrap_err();
    assert_eq!(err.to_string(), "Entity manager \"default\" is closed");
    assert!(em.flush().is_err());
}

#[test]
fn test_lifecycle_events_reach_listeners() {
    let injector = Arc::new(Injector::new());
    let recorder = Arc::new(Recorder::default());
    injector.bind_instance::<dyn EventListener>("app.recorder", recorder.clone());

    let mut events = EventsConfig::default();
    for event in [PRE_PERSIST, PRE_FLUSH, ON_FLUSH, POST_FLUSH, ON_CLEAR, LOAD_CLASS_METADATA] {
        events = events.with_listener(event, "app.recorder");
    }
    let config = single_manager()
        .with_entity_manager(
            attribute_manager("default", "default", "app::entity").with_events(events),
        )
        .build();
    let context = init_app_with_injector(config, injector).unwrap();
    let em = context.manager().get_manager(None).unwrap();

    em.persist(USER, json!({ "id": 1 })).unwrap();
    em.flush().unwrap();
    em.clear().unwrap();

    assert_eq!(
        recorder.seen(),
        vec![LOAD_CLASS_METADATA, PRE_PERSIST, PRE_FLUSH, ON_FLUSH, POST_FLUSH, ON_CLEAR]
    );
    // Manager listeners live on the connection's event manager
    assert!(em.connection().event_manager().has_listeners(ON_FLUSH));
}

#[test]
fn test_rejected_manager_attaches_no_listeners() {
    let injector = Arc::new(Injector::new());
    let recorder = Arc::new(Recorder::default());
    injector.bind_instance::<dyn EventListener>("app.recorder", recorder.clone());
    let config = single_manager()
        .with_entity_manager(attribute_manager("default", "default", "app::entity"))
        .build();
    let mut context = init_app_with_injector(config, injector).unwrap();

    // The recorder resolves as a listener but not as a subscriber
    let events = EventsConfig::default()
        .with_listener(PRE_FLUSH, "app.recorder")
        .with_subscriber("app.recorder");
    let err = context
        .add_entity_manager(
            &attribute_manager("extra", "default", "app::entity").with_events(events),
        )
        .unwrap_err();
    assert!(err.is_configuration_error());
    assert_eq!(context.manager().manager_names(), vec!["default"]);

    let connection = context.manager().get_connection(None).unwrap();
    assert!(!connection.event_manager().has_listeners(PRE_FLUSH));
    context.manager().get_manager(None).unwrap().flush().unwrap();
    assert!(recorder.seen().is_empty());
}

#[test]
fn test_event_args_name_the_entity_manager() {
    let injector = Arc::new(Injector::new());
    let recorder = Arc::new(Recorder::default());
    injector.bind_instance::<dyn EventListener>("app.recorder", recorder.clone());
    let listen = || {
        EventsConfig::default()
            .with_listener(ON_CLEAR, "app.recorder")
            .with_listener(PRE_PERSIST, "app.recorder")
    };
    let config = single_manager()
        .with_entity_manager(attribute_manager("a", "default", "app::entity").with_events(listen()))
        .with_entity_manager(attribute_manager("b", "default", "app::entity").with_events(listen()))
        .with_default_entity_manager("a")
        .build();
    let context = init_app_with_injector(config, injector).unwrap();

    context
        .manager()
        .get_manager(Some("b"))
        .unwrap()
        .persist(USER, json!({ "id": 7 }))
        .unwrap();
    context.manager().reset_manager(Some("a")).unwrap();

    // Both managers share the connection's event manager, so each event
    // reaches both registrations
    let received = recorder.received();
    assert_eq!(received.len(), 4);
    assert!(received[..2].iter().all(|args| {
        args.event == PRE_PERSIST
            && args.entity_manager.as_deref() == Some("b")
            && args.class.as_deref() == Some(USER)
    }));
    assert!(received[2..].iter().all(|args| {
        args.event == ON_CLEAR && args.entity_manager.as_deref() == Some("a")
    }));
    assert!(
        received
            .iter()
            .all(|args| args.connection.as_deref() == Some("default"))
    );
}

#[test]
fn test_metadata_is_cached() {
    let config = single_manager()
        .with_entity_manager(attribute_manager("default", "default", "app::entity"))
        .with_cache(CacheConfig {
            metadata: Some(CacheRoleConfig::new("array").with_namespace("meta_")),
            ..Default::default()
        })
        .build();
    let context = init_app(config).unwrap();
    let em = context.manager().get_manager(None).unwrap();

    let metadata = em.metadata_factory().metadata_for(USER).unwrap();

    assert_eq!(metadata.table, "users");
    assert_eq!(metadata.identifier(), vec!["id"]);
    assert_eq!(
        metadata.field("emailAddress").unwrap().column.as_deref(),
        Some("emailAddress")
    );
    let cache = em.configuration().metadata_cache();
    assert!(cache.exists("app::entity::User$CLASSMETADATA").unwrap());

    em.metadata_factory().clear_loaded();
    let reloaded = em.metadata_factory().metadata_for(USER).unwrap();
    assert_eq!(*reloaded, *metadata);
}

#[test]
fn test_naming_strategy_shapes_metadata() {
    let config = single_manager()
        .with_entity_manager(
            attribute_manager("default", "default", "app::entity")
                .with_naming_strategy("orm.naming.underscore"),
        )
        .build();
    let context = init_app(config).unwrap();
    let em = context.manager().get_manager(None).unwrap();

    let metadata = em.metadata_factory().metadata_for(USER).unwrap();
    assert_eq!(metadata.column_names(), vec!["id", "email_address"]);

    let post = em.metadata_factory().metadata_for(POST).unwrap();
    assert_eq!(post.table, "post");
}

#[test]
fn test_filters() {
    let config = single_manager()
        .with_entity_manager(
            attribute_manager("default", "default", "app::entity")
                .with_filter("soft_delete", "app.filter.soft_delete"),
        )
        .build();
    let context = init_app(config).unwrap();
    let em = context.manager().get_manager(None).unwrap();
    let filters = em.filters();

    assert_eq!(filters.enable("soft_delete").unwrap(), "app.filter.soft_delete");
    assert!(filters.is_enabled("soft_delete"));
    assert_eq!(filters.enabled_filters(), vec!["soft_delete"]);
    filters.disable("soft_delete").unwrap();
    assert!(filters.disable("soft_delete").is_err());
    assert!(filters.enable("tenant").is_err());
}

#[test]
fn test_repository_is_cached_per_class() {
    let context = init_app(
        single_manager()
            .with_entity_manager(attribute_manager("default", "default", "app::entity"))
            .build(),
    )
    .unwrap();
    let em = context.manager().get_manager(None).unwrap();

    let first = em.get_repository(USER).unwrap();
    let second = em.get_repository("Proxy::__CG__::app::entity::User").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
