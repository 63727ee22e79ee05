//! Vector Store Provider Registry
//!
//! Providers register a [`VectorStoreProviderEntry`] via
//! `#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]`.
//! [`BackendRegistry`] turns those entries into a dispatch table keyed by
//! [`BackendKind`] and performs the selection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};
use vecgate_domain::error::{Error, Result};
use vecgate_domain::ports::providers::VectorStoreProvider;
use vecgate_domain::value_objects::{Backend, BackendKind};

/// Configuration for vector store provider creation
///
/// Contains all configuration options that a vector store provider might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct VectorStoreProviderConfig {
    /// Backend identifier as configured (e.g., "qdrant", "memory", "disabled")
    pub provider: String,
    /// Connection URI or path
    pub uri: Option<String>,
    /// Prefix applied to collection names
    pub collection_prefix: Option<String>,
    /// Embedding dimensions
    pub dimensions: Option<usize>,
    /// API key or token for authentication
    pub api_key: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl VectorStoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the collection prefix
    pub fn with_collection_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collection_prefix = Some(prefix.into());
        self
    }

    /// Set the dimensions
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Read a boolean flag from `extra` (`true`, `1`, `yes`, `on`)
    pub fn extra_flag(&self, key: &str) -> bool {
        self.extra.get(key).is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
    }
}

/// Registry entry for vector store providers
///
/// Each vector store provider implementation registers itself with this entry
/// using `#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]`. The entry
/// contains metadata and a factory function to create provider instances.
pub struct VectorStoreProviderEntry {
    /// Backend this provider implements
    pub kind: BackendKind,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static VECTOR_STORE_PROVIDERS: [VectorStoreProviderEntry] = [..];

/// Constructor thunk bound to one backend kind
pub type BackendFactory =
    Arc<dyn Fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>> + Send + Sync>;

#[derive(Clone)]
struct RegisteredFactory {
    description: String,
    factory: BackendFactory,
}

/// Dispatch table from [`BackendKind`] to constructor thunk
///
/// Holds no provider instances. [`select`](Self::select) runs at most the one
/// factory matching the requested kind; every other factory stays untouched.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    factories: HashMap<BackendKind, RegisteredFactory>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from every provider linked into the binary
    pub fn linked() -> Self {
        let mut registry = Self::new();
        for entry in VECTOR_STORE_PROVIDERS {
            let factory = entry.factory;
            if let Err(e) = registry.register(entry.kind, entry.description, factory) {
                warn!(kind = %entry.kind, error = %e, "Skipping linked vector store provider");
            }
        }
        debug!(kinds = ?registry.kinds(), "Vector store registry built from linked providers");
        registry
    }

    /// Register a factory for `kind`, replacing any previous one
    ///
    /// `Disabled` cannot carry a factory; it always selects the disabled
    /// sentinel.
    pub fn register<F>(
        &mut self,
        kind: BackendKind,
        description: impl Into<String>,
        factory: F,
    ) -> Result<()>
    where
        F: Fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>>
            + Send
            + Sync
            + 'static,
    {
        if kind == BackendKind::Disabled {
            return Err(Error::invalid_argument(
                "The disabled backend cannot be given a provider factory",
            ));
        }
        let previous = self.factories.insert(
            kind,
            RegisteredFactory {
                description: description.into(),
                factory: Arc::new(factory),
            },
        );
        if previous.is_some() {
            debug!(kind = %kind, "Replaced vector store provider factory");
        }
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_factory<F>(
        mut self,
        kind: BackendKind,
        description: impl Into<String>,
        factory: F,
    ) -> Result<Self>
    where
        F: Fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>>
            + Send
            + Sync
            + 'static,
    {
        self.register(kind, description, factory)?;
        Ok(self)
    }

    /// Select the backend named by `config.provider`
    ///
    /// # Errors
    /// * [`Error::UnsupportedBackend`] - identifier outside [`BackendKind`]
    /// * [`Error::BackendUnavailable`] - supported kind without a linked provider
    /// * any error raised by the provider's own constructor
    pub fn select(&self, config: &VectorStoreProviderConfig) -> Result<Backend> {
        let kind = BackendKind::parse(&config.provider)?;
        self.select_kind(kind, config)
    }

    /// Select a backend by kind
    ///
    /// `Disabled` yields [`Backend::Disabled`] without touching any factory.
    pub fn select_kind(
        &self,
        kind: BackendKind,
        config: &VectorStoreProviderConfig,
    ) -> Result<Backend> {
        if kind == BackendKind::Disabled {
            return Ok(Backend::Disabled);
        }

        let entry = self
            .factories
            .get(&kind)
            .ok_or_else(|| Error::BackendUnavailable {
                kind,
                available: self.kinds(),
            })?;

        let provider = (entry.factory)(config)?;
        info!(kind = %kind, "Vector store provider constructed");
        Ok(Backend::enabled(kind, provider))
    }

    /// Whether a factory is registered for `kind`
    pub fn contains(&self, kind: BackendKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Registered kinds, in declaration order
    pub fn kinds(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|kind| self.factories.contains_key(kind))
            .collect()
    }

    /// Registered (kind, description) pairs, in declaration order
    pub fn list(&self) -> Vec<(BackendKind, String)> {
        BackendKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.factories
                    .get(&kind)
                    .map(|entry| (kind, entry.description.clone()))
            })
            .collect()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// List all linked vector store providers
///
/// Returns a list of (name, description) tuples for all registered
/// vector store providers. Useful for CLI help.
pub fn list_vector_store_providers() -> Vec<(&'static str, &'static str)> {
    VECTOR_STORE_PROVIDERS
        .iter()
        .map(|e| (e.kind.as_str(), e.description))
        .collect()
}
