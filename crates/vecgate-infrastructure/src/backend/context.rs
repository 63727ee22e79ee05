//! Process-level vector database context
//!
//! Owns everything that would otherwise be a global: the registry, the
//! backend slot and the symbol cache. Applications build one at startup and
//! pass it (or its client) around; tests build as many isolated ones as they
//! like.

use std::fmt;
use std::sync::Arc;

use tracing::info;
use vecgate_application::ports::registry::BackendRegistry;
use vecgate_domain::error::Result;
use vecgate_domain::value_objects::Backend;

use super::client::VectorDbClient;
use super::singleton::BackendSingleton;
use crate::config::{AppConfig, VectorDbConfig};
use crate::constants::{VECTOR_DB_CLIENT_SYMBOL, VECTOR_DB_NAMESPACE, VECTOR_DB_REGISTRY_SYMBOL};
use crate::lazy::{Namespace, SymbolCache};

/// What [`VectorDbContext::invalidate`] clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidateScope {
    /// Cached symbols only
    Symbols,
    /// The backend slot only
    Backend,
    /// Both
    All,
}

/// Registry, backend slot and symbol cache for one process
#[derive(Clone)]
pub struct VectorDbContext {
    registry: Arc<BackendRegistry>,
    singleton: Arc<BackendSingleton>,
    symbols: Arc<SymbolCache>,
}

impl VectorDbContext {
    /// Build a context; nothing is constructed until first use
    ///
    /// The configuration is read once, here. The symbol cache comes with the
    /// `vector_db` namespace registered, exposing `client` and `registry`.
    pub fn new(config: &VectorDbConfig, registry: BackendRegistry) -> Self {
        let registry = Arc::new(registry);
        let singleton = Arc::new(BackendSingleton::new(
            Arc::clone(&registry),
            config.to_provider_config(),
        ));
        let symbols = Arc::new(SymbolCache::new());

        let ns_singleton = Arc::clone(&singleton);
        let ns_registry = Arc::clone(&registry);
        symbols.register(VECTOR_DB_NAMESPACE, move || {
            Ok(Namespace::new(VECTOR_DB_NAMESPACE)
                .with_symbol(
                    VECTOR_DB_CLIENT_SYMBOL,
                    VectorDbClient::new(Arc::clone(&ns_singleton)),
                )
                .with_shared(VECTOR_DB_REGISTRY_SYMBOL, Arc::clone(&ns_registry)))
        });

        Self {
            registry,
            singleton,
            symbols,
        }
    }

    /// Context over the providers linked into this binary
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.vector_db, BackendRegistry::linked())
    }

    /// Guarded client sharing this context's backend slot
    pub fn client(&self) -> VectorDbClient {
        VectorDbClient::new(Arc::clone(&self.singleton))
    }

    /// The selected backend, constructing it on first call
    pub async fn backend(&self) -> Result<Backend> {
        self.singleton.get().await
    }

    /// Backend slot
    pub fn singleton(&self) -> &Arc<BackendSingleton> {
        &self.singleton
    }

    /// Symbol cache
    pub fn symbols(&self) -> &Arc<SymbolCache> {
        &self.symbols
    }

    /// Backend registry
    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    /// Admin hook: clear cached state
    ///
    /// Outstanding clients and lazy handles keep whatever they already hold.
    pub async fn invalidate(&self, scope: InvalidateScope) {
        info!(?scope, "Invalidating vector database context");
        if matches!(scope, InvalidateScope::Symbols | InvalidateScope::All) {
            self.symbols.invalidate();
        }
        if matches!(scope, InvalidateScope::Backend | InvalidateScope::All) {
            self.singleton.reset().await;
        }
    }
}

impl fmt::Debug for VectorDbContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorDbContext")
            .field("registry", &self.registry)
            .field("singleton", &self.singleton)
            .field("symbols", &self.symbols)
            .finish()
    }
}
