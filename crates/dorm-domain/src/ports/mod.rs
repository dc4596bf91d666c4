//! Domain Port Interfaces
//!
//! Boundary contracts implemented by providers and infrastructure.
//!
//! - **cache** - cache backends for the four ORM cache roles
//! - **dbal** - drivers, platforms, middleware, custom types, schema managers
//! - **events** - lifecycle event listeners and subscribers
//! - **orm** - naming/quote strategies, repositories, mapping drivers

/// Cache backend port
pub mod cache;
/// Database abstraction layer ports
pub mod dbal;
/// Event listener ports
pub mod events;
/// Object mapper ports
pub mod orm;

pub use cache::{CacheEntryConfig, CacheProvider, CacheProviderExt, CacheStats};
pub use dbal::{
    AssetFilter, DatabasePlatform, DbalType, Driver, DriverConnection, Middleware, SchemaManager,
    SchemaManagerFactory,
};
pub use events::{EventListener, EventSubscriber};
pub use orm::{
    EntityListenerResolver, MappingDriver, NamingStrategy, ObjectRepository, QuoteStrategy,
    RepositoryFactory, TypedFieldMapper,
};
