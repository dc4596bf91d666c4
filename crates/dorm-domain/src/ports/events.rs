//! Event listener ports

use crate::error::Result;
use crate::events::EventArgs;

/// Receives dispatched lifecycle events
pub trait EventListener: Send + Sync {
    /// Handle one dispatched event
    fn handle(&self, args: &EventArgs) -> Result<()>;
}

/// Listener that declares the events it wants
pub trait EventSubscriber: EventListener {
    /// Event names this subscriber is registered for
    fn subscribed_events(&self) -> Vec<String>;
}
