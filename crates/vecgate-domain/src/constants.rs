//! Domain constants

/// Backend selected when configuration does not name one
pub const DEFAULT_BACKEND: &str = "memory";

/// Metadata key under which providers store the generated vector id
pub const METADATA_ID_KEY: &str = "id";

/// Collection probed by the default `health_check` implementation
pub const HEALTH_CHECK_COLLECTION: &str = "__health_check__";
