//! Provider-specific constants

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default maximum number of entries of in-process caches
pub const CACHE_DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// File extension of file cache entries
pub const FILE_CACHE_EXTENSION: &str = "json";

// ============================================================================
// DRIVER CONSTANTS
// ============================================================================

/// Default size of the PostgreSQL session pool
pub const POSTGRES_DEFAULT_POOL_SIZE: u32 = 4;

/// Server version reported by the in-memory driver
pub const MEMORY_SERVER_VERSION: &str = "memory";

/// Platform used by the in-memory driver when none is configured
pub const MEMORY_DEFAULT_PLATFORM: &str = "sqlite";
