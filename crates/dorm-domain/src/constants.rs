//! Domain layer constants
//!
//! Names and defaults shared by every layer. Infrastructure-specific
//! constants remain in `dorm_infrastructure::constants`.

// ============================================================================
// REGISTRY CONSTANTS
// ============================================================================

/// Default connection name
pub const DEFAULT_CONNECTION: &str = "default";

/// Default entity manager name
pub const DEFAULT_ENTITY_MANAGER: &str = "default";

/// Default migration configuration name
pub const DEFAULT_MIGRATION_CONFIGURATION: &str = "default";

// ============================================================================
// CLASS NAME CONSTANTS
// ============================================================================

/// Separator between class path segments
pub const CLASS_SEPARATOR: &str = "::";

/// Marker segment of generated lazy-proxy classes
pub const PROXY_MARKER: &str = "__CG__";

/// Fragment found in anonymous (closure or generated) type names
pub const ANONYMOUS_CLASS_FRAGMENT: &str = "{{";

// ============================================================================
// ORM CONSTANTS
// ============================================================================

/// Default proxy namespace
pub const DEFAULT_PROXY_NAMESPACE: &str = "Proxy";

/// Suffix of metadata cache keys
pub const METADATA_CACHE_SUFFIX: &str = "$CLASSMETADATA";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default cache key namespace
pub const DEFAULT_CACHE_NAMESPACE: &str = "doctrine_";
