//! Object mapper wiring
//!
//! | Type | Role |
//! |------|------|
//! | [`OrmConfiguration`] | strategies, mapping chain, caches, tuning |
//! | [`OrmConfigurationFactory`] | `[[orm.entity_managers]]` block to configuration |
//! | [`ClassMetadataFactory`] | cached class metadata |
//! | [`EntityManager`] | identity map, lifecycle events, repositories |
//! | [`EntityManagerFactory`] | connection + configuration + events |

pub mod configuration;
pub mod configuration_factory;
pub mod entity_manager;
pub mod entity_manager_factory;
pub mod filters;
pub mod mapping;
pub mod metadata_factory;

pub use configuration::{DqlFunctionKind, OrmConfiguration};
pub use configuration_factory::OrmConfigurationFactory;
pub use entity_manager::EntityManager;
pub use entity_manager_factory::EntityManagerFactory;
pub use filters::FilterCollection;
pub use metadata_factory::ClassMetadataFactory;
