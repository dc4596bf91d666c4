//! ORM cache selection
//!
//! [`CacheFactory`] turns one `[cache.<role>]` block into a backend;
//! [`CacheCollector`] holds the backends of the four roles.

pub mod collector;
pub mod factory;

pub use collector::{CacheCollector, CacheRole};
pub use factory::CacheFactory;
