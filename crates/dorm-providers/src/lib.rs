//! # dorm - Provider Implementations
//!
//! Concrete implementations of the ports defined in `dorm-domain`. Every
//! implementation registers itself in a `dorm-application` registry at link
//! time and is selected by name from configuration.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheProvider` | Null, File, Moka (`array`, `apcu`), Redis, Memcached |
//! | Driver | `Driver` | Memory, PostgreSQL |
//! | Middleware | `Middleware` | Logging |
//! | Schema | `SchemaManagerFactory` | Default |
//! | Types | `DbalType` | Uuid |
//! | ORM | strategy ports | naming, quote, listener resolver, typed field mapper, repositories |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! dorm-providers = { version = "0.1", default-features = false, features = ["cache-moka", "driver-postgres"] }
//! ```
//!
//! Binaries must link this crate (`extern crate dorm_providers;`) for the
//! registrations to be visible.

pub use dorm_domain::error::{Error, Result};
pub use dorm_domain::ports::{CacheProvider, DatabasePlatform, Driver, Middleware};

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
pub mod cache;

/// Database drivers, platforms and DBAL extensions
pub mod dbal;

/// Default object mapper strategies
pub mod orm;
