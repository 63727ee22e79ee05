//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `vecgate_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "vecgate.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "vecgate";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "VECGATE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "VECGATE_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "vecgate";

// ============================================================================
// SYMBOL CACHE CONSTANTS
// ============================================================================

/// Namespace under which a context publishes its vector database handles
pub const VECTOR_DB_NAMESPACE: &str = "vector_db";

/// Symbol holding the guarded `VectorDbClient`
pub const VECTOR_DB_CLIENT_SYMBOL: &str = "client";

/// Symbol holding the `BackendRegistry`
pub const VECTOR_DB_REGISTRY_SYMBOL: &str = "registry";
