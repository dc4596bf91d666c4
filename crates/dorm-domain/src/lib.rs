//! # dorm domain layer
//!
//! Core types shared by every dorm crate: the error type, value objects
//! (connection parameters, class metadata, identity map, class names),
//! lifecycle event names and the port traits implemented by providers.
//!
//! ## Organization
//!
//! - `error` - [`Error`] and [`Result`]
//! - `constants` - default names and markers
//! - `events` - lifecycle event names and [`events::EventArgs`]
//! - `value_objects` - parameters, metadata, identity map
//! - `ports` - cache, DBAL, ORM and event ports

/// Default names and markers
pub mod constants;
/// Error type
pub mod error;
/// Lifecycle events
pub mod events;
/// Port traits
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
