//! Lifecycle events
//!
//! Event names dispatched by connections and entity managers, and the
//! argument record passed to listeners.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dispatched before an entity manager flushes
pub const PRE_FLUSH: &str = "preFlush";
/// Dispatched while an entity manager flushes
pub const ON_FLUSH: &str = "onFlush";
/// Dispatched after an entity manager flushed
pub const POST_FLUSH: &str = "postFlush";
/// Dispatched when an entity manager identity map is cleared
pub const ON_CLEAR: &str = "onClear";
/// Dispatched before an entity is scheduled for persistence
pub const PRE_PERSIST: &str = "prePersist";
/// Dispatched after class metadata has been loaded
pub const LOAD_CLASS_METADATA: &str = "loadClassMetadata";
/// Dispatched after a connection opened its driver session
pub const POST_CONNECT: &str = "postConnect";

/// All lifecycle events known to dorm
pub const ALL_EVENTS: [&str; 7] = [
    PRE_FLUSH,
    ON_FLUSH,
    POST_FLUSH,
    ON_CLEAR,
    PRE_PERSIST,
    LOAD_CLASS_METADATA,
    POST_CONNECT,
];

/// Arguments passed to event listeners
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventArgs {
    /// Event name
    pub event: String,
    /// Class involved in the event, if any
    pub class: Option<String>,
    /// Entity payload, if any
    pub entity: Option<Value>,
    /// Connection name, if known
    pub connection: Option<String>,
    /// Name of the entity manager that fired the event
    pub entity_manager: Option<String>,
}

impl EventArgs {
    /// Create arguments for the given event
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Default::default()
        }
    }

    /// Set the class involved in the event
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the entity payload
    pub fn with_entity(mut self, entity: Value) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Set the connection name
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Set the entity manager name
    pub fn with_entity_manager(mut self, entity_manager: impl Into<String>) -> Self {
        self.entity_manager = Some(entity_manager.into());
        self
    }
}
