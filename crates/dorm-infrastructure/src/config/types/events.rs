//! Event bundle configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Listeners and subscribers of one event manager
///
/// ```toml
/// [dbal.events]
/// subscribers = ["app.audit_subscriber"]
///
/// [dbal.events.listeners]
/// postConnect = ["app.session_init"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Event name to listener component names
    pub listeners: BTreeMap<String, Vec<String>>,

    /// Subscriber component names
    pub subscribers: Vec<String>,
}

impl EventsConfig {
    /// Add a listener component for `event`
    pub fn with_listener(mut self, event: impl Into<String>, component: impl Into<String>) -> Self {
        self.listeners
            .entry(event.into())
            .or_default()
            .push(component.into());
        self
    }

    /// Add a subscriber component
    pub fn with_subscriber(mut self, component: impl Into<String>) -> Self {
        self.subscribers.push(component.into());
        self
    }

    /// True when nothing is configured
    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty) && self.subscribers.is_empty()
    }
}
