//! Provider Registry System
//!
//! Defines the auto-registration infrastructure for plugins. Uses the
//! `linkme` crate for compile-time registration of implementations that are
//! discovered and instantiated by name at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(COMPONENTS)] │
//! │                        static ENTRY: ComponentEntry = ...       │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static COMPONENTS: [Entry] = [..]    │
//! │                              ↓                                  │
//! │  3. Resolver queries:  COMPONENTS.iter()                        │
//! │                              ↓                                  │
//! │  4. Config selects:    naming_strategy = "orm.naming.underscore"│
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Registering a cache backend (in dorm-providers)
//!
//! ```ignore
//! use dorm_application::ports::registry::{CacheProviderEntry, CACHE_PROVIDERS};
//!
//! #[linkme::distributed_slice(CACHE_PROVIDERS)]
//! static ARRAY_PROVIDER: CacheProviderEntry = CacheProviderEntry {
//!     name: "array",
//!     description: "In-process cache",
//!     factory: |config| Ok(Arc::new(ArrayCacheProvider::from_config(config))),
//! };
//! ```
//!
//! ### Resolving (in dorm-infrastructure)
//!
//! ```ignore
//! use dorm_application::ports::registry::resolve_cache_provider;
//!
//! let provider = resolve_cache_provider(&CacheProviderConfig::new("array"))?;
//! ```

pub mod cache;
pub mod component;
pub mod driver;
pub mod entity;

// Re-export all registry types and functions
pub use cache::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry, is_cache_provider_registered,
    list_cache_providers, resolve_cache_provider,
};
pub use component::{
    COMPONENTS, Component, ComponentEntry, find_component, list_components,
};
pub use driver::{DATABASE_DRIVERS, DriverEntry, list_drivers, resolve_driver};
pub use entity::{ENTITIES, EntityEntry, find_entity, list_entities};
