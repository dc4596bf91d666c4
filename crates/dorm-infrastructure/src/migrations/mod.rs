//! Migration configurations
//!
//! Named migration configuration sets built from `[[migrations]]` blocks,
//! and the dependency resolution the migration commands start from.

pub mod configuration;
pub mod dependencies;
pub mod factory;
pub mod registry;

pub use configuration::MigrationConfiguration;
pub use dependencies::{MigrationDependencies, MigrationTarget};
pub use factory::MigrationConfigurationFactory;
pub use registry::MigrationConfigurationRegistry;
