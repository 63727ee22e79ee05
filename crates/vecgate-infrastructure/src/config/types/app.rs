//! Main application configuration

use super::{LoggingConfig, VectorDbConfig};
use serde::{Deserialize, Serialize};

/// Root of the configuration tree
///
/// ```toml
/// [vector_db]
/// backend = "qdrant"
/// uri = "http://localhost:6333"
/// multitenancy = true
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Vector database selection and connection settings
    pub vector_db: VectorDbConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}
