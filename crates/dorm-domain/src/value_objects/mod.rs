//! Domain value objects

/// Class name helpers (proxies, anonymous classes, namespaces)
pub mod class_name;
/// In-memory identity map
pub mod identity_map;
/// Class metadata and its builder
pub mod metadata;
/// Driver connection parameters
pub mod params;

pub use identity_map::IdentityMap;
pub use metadata::{ClassMetadata, ClassMetadataBuilder, FieldMapping};
pub use params::ConnectionParams;
