//! Single backend slot with at-most-once construction
//!
//! The slot starts empty. The first successful [`BackendSingleton::get`]
//! selects and constructs the configured backend and stores it; every later
//! call returns that same value until [`BackendSingleton::reset`].

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use vecgate_application::ports::registry::{BackendRegistry, VectorStoreProviderConfig};
use vecgate_domain::error::Result;
use vecgate_domain::ports::providers::VectorStoreProvider;
use vecgate_domain::value_objects::{Backend, BackendKind};

/// Lazily populated slot holding the selected [`Backend`]
///
/// Reads of a populated slot are lock-free. Initialization and reset are
/// serialized on an async mutex, so concurrent first callers construct the
/// backend once and all observe the same result, and a reset never races an
/// in-flight construction. A failed selection is returned to the caller that
/// triggered it and leaves the slot empty.
pub struct BackendSingleton {
    registry: Arc<BackendRegistry>,
    config: VectorStoreProviderConfig,
    slot: ArcSwapOption<Backend>,
    init_lock: Mutex<()>,
}

impl BackendSingleton {
    /// Empty slot that will select `config.provider` from `registry`
    pub fn new(registry: Arc<BackendRegistry>, config: VectorStoreProviderConfig) -> Self {
        Self {
            registry,
            config,
            slot: ArcSwapOption::empty(),
            init_lock: Mutex::new(()),
        }
    }

    /// The selected backend, constructing it on first call
    pub async fn get(&self) -> Result<Backend> {
        if let Some(backend) = self.slot.load_full() {
            return Ok(Backend::clone(&backend));
        }

        let _guard = self.init_lock.lock().await;
        // Another task may have finished while we waited
        if let Some(backend) = self.slot.load_full() {
            return Ok(Backend::clone(&backend));
        }

        debug!(backend = %self.config.provider, "Selecting vector database backend");
        let backend = self.registry.select(&self.config).inspect_err(|e| {
            error!(backend = %self.config.provider, error = %e, "Vector database backend selection failed");
        })?;

        if backend.is_disabled() {
            warn!("Vector database is disabled; vector operations will fail");
        } else {
            info!(kind = %backend.kind(), "Vector database backend ready");
        }
        self.slot.store(Some(Arc::new(backend.clone())));
        Ok(backend)
    }

    /// The live provider; fails with `BackendDisabled` on the sentinel
    pub async fn provider(&self) -> Result<Arc<dyn VectorStoreProvider>> {
        self.get().await?.provider().cloned()
    }

    /// Whether the slot holds a backend (the disabled sentinel counts)
    pub fn is_initialized(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Kind of the stored backend without triggering construction
    pub fn current_kind(&self) -> Option<BackendKind> {
        self.slot.load_full().map(|backend| backend.kind())
    }

    /// Empty the slot; the next `get` selects again
    ///
    /// Waits for an in-flight construction to finish, then discards its
    /// result. Callers still holding the old provider keep using it.
    pub async fn reset(&self) {
        let _guard = self.init_lock.lock().await;
        if self.slot.swap(None).is_some() {
            info!("Vector database backend reset");
        }
    }

    /// Settings handed to the provider factory
    pub fn config(&self) -> &VectorStoreProviderConfig {
        &self.config
    }

    /// Registry backends are selected from
    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }
}

impl fmt::Debug for BackendSingleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSingleton")
            .field("backend", &self.config.provider)
            .field("current", &self.current_kind())
            .finish_non_exhaustive()
    }
}
