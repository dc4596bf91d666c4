//! Application Layer - dorm
//!
//! Declares the link-time registries that tie configuration names to
//! implementations. Providers add entries with
//! `#[linkme::distributed_slice(...)]`; infrastructure resolves them by name.
//!
//! ## Registries
//!
//! - `CACHE_PROVIDERS`: cache backends by driver name
//! - `DATABASE_DRIVERS`: database drivers by `params.driver`
//! - `COMPONENTS`: injectable components by component name
//! - `ENTITIES`: compile-time mapped entity classes
//!
//! ## Dependencies
//!
//! This crate depends only on `dorm-domain` and `linkme`.

pub mod ports;

pub use ports::registry;
