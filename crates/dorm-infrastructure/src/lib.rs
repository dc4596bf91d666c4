//! # Infrastructure Layer
//!
//! Configuration and wiring of the database abstraction layer, the object
//! mapper and migrations.
//!
//! ## Module Categories
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`aliases`] | `@alias` path resolution |
//! | [`di`] | Named component injector |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Database
//! | Module | Description |
//! |--------|-------------|
//! | [`dbal`] | Type registry, connection configuration and connections |
//! | [`orm`] | Mapping drivers, metadata and entity managers |
//! | [`migrations`] | Named migration configurations |
//! | [`manager`] | Registry of connections and entity managers |
//!
//! ### Cross-cutting
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Cache backend selection per ORM role |
//! | [`events`] | Event managers and listener wiring |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Composition root |

pub mod aliases;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod dbal;
pub mod di;
pub mod error_ext;
pub mod events;
pub mod logging;
pub mod manager;
pub mod migrations;
pub mod orm;

pub use bootstrap::{AppContext, init_app, init_app_with_injector};
pub use dorm_domain::error::{Error, Result};
pub use error_ext::ErrorContext;
