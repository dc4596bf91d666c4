//! Event manager
//!
//! Listeners are kept per event name in registration order. A connection
//! owns one event manager; the entity managers built on that connection
//! add their own listeners to it.

use dorm_domain::error::Result;
use dorm_domain::events::EventArgs;
use dorm_domain::ports::events::{EventListener, EventSubscriber};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

type ListenerMap = BTreeMap<String, Vec<Arc<dyn EventListener>>>;

/// Dispatches lifecycle events to registered listeners
#[derive(Default)]
pub struct EventManager {
    listeners: RwLock<ListenerMap>,
}

impl EventManager {
    /// Event manager without listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`
    pub fn add_event_listener(&self, event: &str, listener: Arc<dyn EventListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// Register `subscriber` for every event it subscribes to
    pub fn add_event_subscriber(&self, subscriber: Arc<dyn EventSubscriber>) {
        let listener: Arc<dyn EventListener> = subscriber.clone();
        for event in subscriber.subscribed_events() {
            self.add_event_listener(&event, Arc::clone(&listener));
        }
    }

    /// Remove `listener` from `event`, true when it was registered
    pub fn remove_event_listener(&self, event: &str, listener: &Arc<dyn EventListener>) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let Some(registered) = listeners.get_mut(event) else {
            return false;
        };
        let before = registered.len();
        registered.retain(|l| !Arc::ptr_eq(l, listener));
        registered.len() != before
    }

    /// Call every listener of `args.event`, stopping at the first failure
    pub fn dispatch(&self, args: &EventArgs) -> Result<()> {
        // Listeners may register further listeners, so call them unlocked
        let listeners = self.listeners(&args.event);
        trace!(event = %args.event, listeners = listeners.len(), "Dispatching event");
        for listener in listeners {
            listener.handle(args)?;
        }
        Ok(())
    }

    /// True when `event` has at least one listener
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .is_some_and(|l| !l.is_empty())
    }

    /// Listeners of `event`
    pub fn listeners(&self, event: &str) -> Vec<Arc<dyn EventListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .cloned()
            .unwrap_or_default()
    }

    /// Events that have listeners
    pub fn events(&self) -> Vec<String> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, l)| !l.is_empty())
            .map(|(event, _)| event.clone())
            .collect()
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        let counts: BTreeMap<&str, usize> = listeners
            .iter()
            .map(|(event, l)| (event.as_str(), l.len()))
            .collect();
        f.debug_struct("EventManager")
            .field("listeners", &counts)
            .finish()
    }
}
