//! Database drivers, platforms and DBAL extensions

pub mod memory;
pub mod middleware;
pub mod platform;
#[cfg(feature = "driver-postgres")]
pub mod postgres;
pub mod schema_manager;
pub mod types;

pub use memory::MemoryDriver;
pub use middleware::{LoggingDriver, LoggingMiddleware};
pub use platform::GenericPlatform;
#[cfg(feature = "driver-postgres")]
pub use postgres::PostgresDriver;
pub use schema_manager::{DefaultSchemaManager, DefaultSchemaManagerFactory};
pub use types::UuidType;
