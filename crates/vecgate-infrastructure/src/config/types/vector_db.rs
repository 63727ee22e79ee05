//! Vector database configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vecgate_application::ports::registry::VectorStoreProviderConfig;
use vecgate_domain::constants::DEFAULT_BACKEND;

/// `extra` key carrying the multitenancy flag down to providers
const MULTITENANCY_KEY: &str = "multitenancy";

/// Vector database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorDbConfig {
    /// Backend identifier: memory, filesystem, qdrant or disabled
    pub backend: String,

    /// Connection URI (Qdrant) or base directory (filesystem)
    pub uri: Option<String>,

    /// API key for remote backends
    pub api_key: Option<String>,

    /// Prefix applied to collection names
    pub collection_prefix: Option<String>,

    /// Embedding dimensions
    pub dimensions: Option<usize>,

    /// Share one physical collection between logical collections (Qdrant)
    pub multitenancy: bool,

    /// Additional provider-specific settings
    pub extra: HashMap<String, String>,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            uri: None,
            api_key: None,
            collection_prefix: None,
            dimensions: None,
            multitenancy: false,
            extra: HashMap::new(),
        }
    }
}

impl VectorDbConfig {
    /// Config for the given backend with every other field defaulted
    pub fn for_backend(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Default::default()
        }
    }

    /// Translate into the settings handed to provider factories
    pub fn to_provider_config(&self) -> VectorStoreProviderConfig {
        let mut config = VectorStoreProviderConfig::new(self.backend.clone());
        config.uri.clone_from(&self.uri);
        config.api_key.clone_from(&self.api_key);
        config.collection_prefix.clone_from(&self.collection_prefix);
        config.dimensions = self.dimensions;
        config.extra.clone_from(&self.extra);
        if self.multitenancy {
            config = config.with_extra(MULTITENANCY_KEY, "true");
        }
        config
    }
}
