//! Configuration management
//!
//! The configuration tree ([`AppConfig`]) and its loader. Configuration is
//! read once at bootstrap from defaults, a TOML file and `DORM_` environment
//! variables, then validated before any object is constructed.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
