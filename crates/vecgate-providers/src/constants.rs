//! Provider constants

/// Default directory of the filesystem vector store
pub const FILESYSTEM_DEFAULT_BASE_PATH: &str = "./data/vectors";

/// File extension of persisted collections
pub const FILESYSTEM_COLLECTION_EXTENSION: &str = "json";

/// Default Qdrant REST endpoint
pub const QDRANT_DEFAULT_URL: &str = "http://localhost:6333";

/// Default prefix for Qdrant collection names
pub const QDRANT_DEFAULT_COLLECTION_PREFIX: &str = "vecgate";

/// Suffix of the shared collection used in multitenancy mode
pub const QDRANT_SHARED_COLLECTION_SUFFIX: &str = "shared";

/// Payload field carrying the logical collection in multitenancy mode
pub const QDRANT_TENANT_FIELD: &str = "tenant_id";

/// Qdrant API key header
pub const QDRANT_API_KEY_HEADER: &str = "api-key";

/// Request timeout for Qdrant calls in seconds
pub const QDRANT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// `extra` key enabling Qdrant multitenancy mode
pub const QDRANT_MULTITENANCY_KEY: &str = "multitenancy";
