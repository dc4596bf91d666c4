//! Dependency injection
//!
//! Components are registered by name, at link time in the `COMPONENTS`
//! registry or programmatically through [`Injector::bind`]. Factories ask
//! the injector for a component and a capability; a component lacking the
//! capability is a configuration error.

pub mod injector;

pub use injector::{ComponentFactory, Injector};
