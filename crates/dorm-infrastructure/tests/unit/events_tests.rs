//! Event manager and event bundle tests

use dorm_domain::error::{Error, Result};
use dorm_domain::events::{EventArgs, ON_FLUSH, POST_FLUSH, PRE_FLUSH};
use dorm_domain::ports::events::{EventListener, EventSubscriber};
use dorm_infrastructure::config::EventsConfig;
use dorm_infrastructure::di::Injector;
use dorm_infrastructure::events::{EventManager, EventManagerFactory};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl Recorder {
    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl EventListener for Recorder {
    fn handle(&self, args: &EventArgs) -> Result<()> {
        self.seen.lock().unwrap().push(args.event.clone());
        Ok(())
    }
}

impl EventSubscriber for Recorder {
    fn subscribed_events(&self) -> Vec<String> {
        vec![PRE_FLUSH.to_string(), POST_FLUSH.to_string()]
    }
}

struct Failing;

impl EventListener for Failing {
    fn handle(&self, args: &EventArgs) -> Result<()> {
        Err(Error::internal(format!("listener failed on {}", args.event)))
    }
}

#[test]
fn test_dispatch_in_registration_order() {
    let manager = EventManager::new();
    let recorder = Arc::new(Recorder::default());
    manager.add_event_listener(ON_FLUSH, recorder.clone());
    manager.add_event_listener(ON_FLUSH, recorder.clone());

    manager.dispatch(&EventArgs::new(ON_FLUSH)).unwrap();
    manager.dispatch(&EventArgs::new(PRE_FLUSH)).unwrap();

    assert_eq!(recorder.seen(), vec![ON_FLUSH, ON_FLUSH]);
    assert!(manager.has_listeners(ON_FLUSH));
    assert!(!manager.has_listeners(PRE_FLUSH));
}

#[test]
fn test_subscriber_registers_each_event() {
    let manager = EventManager::new();
    manager.add_event_subscriber(Arc::new(Recorder::default()));
    assert_eq!(manager.events(), vec![POST_FLUSH, PRE_FLUSH]);
}

#[test]
fn test_remove_listener() {
    let manager = EventManager::new();
    let listener: Arc<dyn EventListener> = Arc::new(Recorder::default());
    manager.add_event_listener(ON_FLUSH, Arc::clone(&listener));

    assert!(manager.remove_event_listener(ON_FLUSH, &listener));
    assert!(!manager.remove_event_listener(ON_FLUSH, &listener));
    assert!(!manager.has_listeners(ON_FLUSH));
}

#[test]
fn test_listener_failure_stops_dispatch() {
    let manager = EventManager::new();
    let recorder = Arc::new(Recorder::default());
    manager.add_event_listener(ON_FLUSH, Arc::new(Failing));
    manager.add_event_listener(ON_FLUSH, recorder.clone());

    assert!(manager.dispatch(&EventArgs::new(ON_FLUSH)).is_err());
    assert!(recorder.seen().is_empty());
}

#[test]
fn test_bundle_resolves_components() {
    let injector = Arc::new(Injector::new());
    let recorder = Arc::new(Recorder::default());
    injector.bind_instance::<dyn EventListener>("app.listener", recorder.clone());
    injector.bind_instance::<dyn EventSubscriber>("app.subscriber", recorder.clone());

    let config = EventsConfig::default()
        .with_listener(ON_FLUSH, "app.listener")
        .with_subscriber("app.subscriber");
    let manager = EventManagerFactory::new(injector)
        .create_for_dbal(&config)
        .unwrap();

    manager.dispatch(&EventArgs::new(PRE_FLUSH)).unwrap();
    manager.dispatch(&EventArgs::new(ON_FLUSH)).unwrap();
    assert_eq!(recorder.seen(), vec![PRE_FLUSH, ON_FLUSH]);
}

#[test]
fn test_bundle_rejects_wrong_capability() {
    let injector = Arc::new(Injector::new());
    injector.bind_instance::<dyn EventListener>("app.listener", Arc::new(Recorder::default()));

    let config = EventsConfig::default().with_subscriber("app.listener");
    let err = EventManagerFactory::new(injector)
        .create_for_dbal(&config)
        .unwrap_err();

    assert!(matches!(err, Error::CapabilityMismatch { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn test_bundle_unknown_component() {
    let config = EventsConfig::default().with_listener(ON_FLUSH, "app.missing");
    let err = EventManagerFactory::new(Arc::new(Injector::new()))
        .create_for_dbal(&config)
        .unwrap_err();
    assert!(err.to_string().contains("app.missing"));
}

#[test]
fn test_failed_bundle_leaves_manager_untouched() {
    let injector = Arc::new(Injector::new());
    injector.bind_instance::<dyn EventListener>("app.listener", Arc::new(Recorder::default()));

    let config = EventsConfig::default()
        .with_listener(ON_FLUSH, "app.listener")
        .with_subscriber("app.listener");
    let manager = EventManager::new();
    let err = EventManagerFactory::new(injector)
        .create_for_orm(&manager, &config)
        .unwrap_err();

    assert!(matches!(err, Error::CapabilityMismatch { .. }));
    assert!(!manager.has_listeners(ON_FLUSH));
}
