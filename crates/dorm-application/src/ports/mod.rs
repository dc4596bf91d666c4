//! Application ports
//!
//! Re-exports the domain ports next to the registries that resolve their
//! implementations.

/// Link-time registries for plugin implementations
pub mod registry;

pub use dorm_domain::ports::*;
