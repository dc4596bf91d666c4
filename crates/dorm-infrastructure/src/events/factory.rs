//! Event bundle builder

use crate::config::EventsConfig;
use crate::di::Injector;
use crate::events::EventManager;
use dorm_domain::error::Result;
use dorm_domain::events::ALL_EVENTS;
use dorm_domain::ports::events::{EventListener, EventSubscriber};
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds event managers from `[*.events]` configuration blocks
#[derive(Debug, Clone)]
pub struct EventManagerFactory {
    injector: Arc<Injector>,
}

impl EventManagerFactory {
    pub fn new(injector: Arc<Injector>) -> Self {
        Self { injector }
    }

    /// Fresh event manager for a connection
    pub fn create_for_dbal(&self, config: &EventsConfig) -> Result<Arc<EventManager>> {
        let manager = EventManager::new();
        self.configure(&manager, config)?;
        Ok(Arc::new(manager))
    }

    /// Add entity manager listeners to the connection's event manager
    pub fn create_for_orm(&self, manager: &EventManager, config: &EventsConfig) -> Result<()> {
        self.configure(manager, config)
    }

    /// Resolve every configured component, then attach them
    ///
    /// Nothing is added to `manager` unless all components resolve.
    fn configure(&self, manager: &EventManager, config: &EventsConfig) -> Result<()> {
        let mut listeners: Vec<(&str, &str, Arc<dyn EventListener>)> = Vec::new();
        for (event, components) in &config.listeners {
            if !ALL_EVENTS.contains(&event.as_str()) {
                warn!(event = %event, "Listeners configured for a custom event");
            }
            for component in components {
                let listener = self.injector.make::<dyn EventListener>(component)?;
                listeners.push((event.as_str(), component.as_str(), listener));
            }
        }

        let subscribers = config
            .subscribers
            .iter()
            .map(|component| {
                self.injector
                    .make::<dyn EventSubscriber>(component)
                    .map(|subscriber| (component, subscriber))
            })
            .collect::<Result<Vec<_>>>()?;

        for (event, component, listener) in listeners {
            manager.add_event_listener(event, listener);
            debug!(event = %event, listener = %component, "Added event listener");
        }
        for (component, subscriber) in subscribers {
            manager.add_event_subscriber(subscriber);
            debug!(subscriber = %component, "Added event subscriber");
        }

        Ok(())
    }
}
