//! Database abstraction layer wiring
//!
//! | Type | Role |
//! |------|------|
//! | [`TypeRegistry`] | process-wide custom type registry |
//! | [`DbalConfiguration`] | per-connection settings |
//! | [`Connection`] | lazily connected session with transaction nesting |
//! | [`ConnectionFactory`] | `[[dbal]]` block to live connection |
//! | [`database`] | create and drop the database a connection targets |

pub mod configuration;
pub mod connection;
pub mod database;
pub mod factory;
pub mod types;

pub use configuration::{DbalConfiguration, DbalConfigurationFactory};
pub use connection::Connection;
pub use database::{DatabaseChange, DatabaseOutcome, create_database, drop_database};
pub use factory::ConnectionFactory;
pub use types::TypeRegistry;
