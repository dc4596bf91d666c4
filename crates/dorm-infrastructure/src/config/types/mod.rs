//! Configuration types module

pub mod app;
pub mod cache;
pub mod dbal;
pub mod events;
pub mod logging;
pub mod migrations;
pub mod orm;

pub use app::AppConfig;
pub use cache::{CacheConfig, CacheRoleConfig, CacheServerConfig};
pub use dbal::DbalConfig;
pub use events::EventsConfig;
pub use logging::LoggingConfig;
pub use migrations::{MigrationConfig, OrganizeMigrations, TableStorageConfig};
pub use orm::{DqlConfig, EntityManagerConfig, MappingConfig, OrmConfig, ProxyConfig};
