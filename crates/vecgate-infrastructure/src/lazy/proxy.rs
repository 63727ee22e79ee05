//! Lazy symbol handles
//!
//! A [`LazySymbol`] names something in a [`SymbolCache`] and resolves it on
//! first use. After that it answers from its own reference, so it keeps
//! working with the value it saw even when the shared cache is invalidated.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use vecgate_domain::error::Result;

use super::symbol_cache::{Namespace, SymbolCache};

/// Handle to a namespace or symbol, resolved on first access
pub struct LazySymbol<T: Any + Send + Sync> {
    cache: Arc<SymbolCache>,
    namespace: String,
    symbol: Option<String>,
    target: ArcSwapOption<T>,
}

impl LazySymbol<Namespace> {
    /// Handle to a whole namespace
    pub fn module(cache: Arc<SymbolCache>, namespace: impl Into<String>) -> Self {
        Self::with_key(cache, namespace.into(), None)
    }

    /// Fetch a symbol from the namespace, loading the namespace if needed
    pub fn symbol<U: Any + Send + Sync>(&self, name: &str) -> Result<Arc<U>> {
        self.get()?.get_as::<U>(name)
    }
}

impl<T: Any + Send + Sync> LazySymbol<T> {
    /// Handle to one symbol inside `namespace`
    pub fn attribute(
        cache: Arc<SymbolCache>,
        namespace: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self::with_key(cache, namespace.into(), Some(symbol.into()))
    }

    fn with_key(cache: Arc<SymbolCache>, namespace: String, symbol: Option<String>) -> Self {
        Self {
            cache,
            namespace,
            symbol,
            target: ArcSwapOption::empty(),
        }
    }

    /// The target, resolving it through the cache on first call
    ///
    /// A failed resolution is returned as is and leaves the handle
    /// unresolved; the next call tries again.
    pub fn get(&self) -> Result<Arc<T>> {
        if let Some(target) = self.target.load_full() {
            return Ok(target);
        }
        let resolved = self
            .cache
            .resolve_as::<T>(&self.namespace, self.symbol.as_deref())?;
        self.target.store(Some(Arc::clone(&resolved)));
        Ok(resolved)
    }

    /// Run `f` against the target
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        let target = self.get()?;
        Ok(f(&target))
    }

    /// Whether the target has been resolved
    pub fn is_resolved(&self) -> bool {
        self.target.load().is_some()
    }

    /// Forget the local reference; the next access resolves again
    pub fn clear(&self) {
        self.target.store(None);
    }

    /// Namespace this handle points into
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Symbol name, `None` for a namespace handle
    pub fn symbol_name(&self) -> Option<&str> {
        self.symbol.as_deref()
    }
}

impl<T: Any + Send + Sync> fmt::Debug for LazySymbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySymbol")
            .field("namespace", &self.namespace)
            .field("symbol", &self.symbol)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
