//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Names shared with other layers are defined in `dorm_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "dorm.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "dorm";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DORM";

/// Separator of nested keys in environment variables (`DORM_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "DORM_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name stem of rolling log files
pub const DEFAULT_LOG_FILE_STEM: &str = "dorm";

// ============================================================================
// ALIAS CONSTANTS
// ============================================================================

/// Prefix marking an alias
pub const ALIAS_PREFIX: char = '@';

/// Maximum nesting of aliases defined through other aliases
pub const ALIAS_MAX_DEPTH: usize = 16;

// ============================================================================
// DBAL CONSTANTS
// ============================================================================

/// Database PostgreSQL sessions use while creating or dropping another
pub const POSTGRES_MAINTENANCE_DATABASE: &str = "postgres";

// ============================================================================
// ORM CONSTANTS
// ============================================================================

/// Default batch size of eager fetches in sub-select mode
pub const DEFAULT_EAGER_FETCH_BATCH_SIZE: usize = 100;

/// Default extension of XML mapping files
pub const XML_MAPPING_EXTENSION: &str = ".orm.xml";

/// Default extension of declarative mapping files
pub const DECLARATIVE_MAPPING_EXTENSION: &str = ".dcm.toml";

// ============================================================================
// MIGRATION CONSTANTS
// ============================================================================

/// Default migration bookkeeping table
pub const MIGRATION_TABLE_NAME: &str = "doctrine_migration_versions";

/// Default version column
pub const MIGRATION_VERSION_COLUMN: &str = "version";

/// Default version column length
pub const MIGRATION_VERSION_COLUMN_LENGTH: u32 = 191;

/// Default executed-at column
pub const MIGRATION_EXECUTED_AT_COLUMN: &str = "executed_at";

/// Default execution time column
pub const MIGRATION_EXECUTION_TIME_COLUMN: &str = "execution_time";
