//! # dorm
//!
//! Wires database connections, entity managers and migration
//! configurations from one declarative configuration.
//!
//! ## Example
//!
//! ```ignore
//! use dorm::infrastructure::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().with_config_path("dorm.toml").load()?;
//! let ctx = dorm::init_app(config)?;
//! let em = ctx.manager().get_manager(None)?;
//! em.persist("app::entity::User", serde_json::json!({"id": 1}))?;
//! em.flush()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - ports, value objects and the error type
//! - `application` - link-time registries of drivers, caches and components
//! - `infrastructure` - configuration, DBAL, ORM, manager registry, migrations
//! - `providers` - cache backends, database drivers and ORM defaults

/// Domain layer - ports, value objects and errors
pub mod domain {
    pub use dorm_domain::*;
}

/// Application layer - registries and component resolution
pub mod application {
    pub use dorm_application::*;
}

/// Infrastructure layer - bootstrap and runtime services
pub mod infrastructure {
    pub use dorm_infrastructure::*;
}

/// Provider implementations registered at link time
pub mod providers {
    pub use dorm_providers::*;
}

pub use dorm_domain::error::{Error, Result};
pub use dorm_infrastructure::{AppContext, init_app, init_app_with_injector};
