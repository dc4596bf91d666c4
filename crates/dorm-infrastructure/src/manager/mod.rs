//! Connection and entity manager registry
//!
//! [`DoctrineManager`] owns every named connection and entity manager of the
//! process. [`DoctrineManagerFactory`] fills it from configuration, the
//! dynamic factories add entries at runtime and the providers look them up.

pub mod doctrine_manager;
pub mod dynamic;
pub mod factory;
pub mod providers;
pub mod registry;

pub use doctrine_manager::DoctrineManager;
pub use dynamic::{DynamicConnectionFactory, DynamicEntityManagerFactory};
pub use factory::DoctrineManagerFactory;
pub use providers::{ConnectionProvider, EntityManagerProvider};
pub use registry::NamedRegistry;
