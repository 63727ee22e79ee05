//! Symbol cache
//!
//! Namespaces are registered as loaders and only run when something inside
//! them is first asked for. Resolved values are cached under
//! `(namespace, symbol?)` until [`SymbolCache::invalidate`].

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use tracing::{debug, error, info};
use vecgate_domain::error::{Error, Result};

/// A resolved, type-erased value
pub type Symbol = Arc<dyn Any + Send + Sync>;

type NamespaceLoader = Arc<dyn Fn() -> Result<Namespace> + Send + Sync>;

/// Cache key: a namespace, or one symbol inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    /// Namespace name
    pub namespace: String,
    /// Symbol name, `None` for the namespace itself
    pub symbol: Option<String>,
}

impl SymbolKey {
    /// Key for `namespace` or `namespace::symbol`
    pub fn new(namespace: impl Into<String>, symbol: Option<&str>) -> Self {
        Self {
            namespace: namespace.into(),
            symbol: symbol.map(str::to_string),
        }
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{}::{symbol}", self.namespace),
            None => f.write_str(&self.namespace),
        }
    }
}

/// A loaded namespace: named symbols produced by one loader run
#[derive(Default)]
pub struct Namespace {
    name: String,
    symbols: HashMap<String, Symbol>,
}

impl Namespace {
    /// Empty namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: HashMap::new(),
        }
    }

    /// Add a symbol by value
    #[must_use]
    pub fn with_symbol<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
        self.with_shared(name, Arc::new(value))
    }

    /// Add an already shared symbol
    #[must_use]
    pub fn with_shared<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: Arc<T>) -> Self {
        self.symbols.insert(name.into(), value);
        self
    }

    /// Namespace name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a symbol
    pub fn get(&self, symbol: &str) -> Option<Symbol> {
        self.symbols.get(symbol).cloned()
    }

    /// Look up a symbol and downcast it
    pub fn get_as<T: Any + Send + Sync>(&self, symbol: &str) -> Result<Arc<T>> {
        let value = self
            .get(symbol)
            .ok_or_else(|| Error::symbol_not_found(&self.name, symbol))?;
        value.downcast::<T>().map_err(|_| Error::SymbolType {
            namespace: self.name.clone(),
            symbol: Some(symbol.to_string()),
            expected: type_name::<T>(),
        })
    }

    /// Symbol names, sorted
    pub fn symbol_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the namespace has no symbols
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("symbols", &self.symbol_names())
            .finish()
    }
}

/// Counters reported by [`SymbolCache::stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Resolutions answered from the cache
    pub hits: u64,
    /// Resolutions that had to compute a value
    pub misses: u64,
    /// Namespace loader runs, failed ones included
    pub loads: u64,
    /// Entries currently cached
    pub entries: usize,
}

/// Unbounded cache of resolved symbols
///
/// Loaders run outside any map lock. When two callers race on a cold key
/// both may compute a value, but only the first one stored is kept and both
/// callers receive it. A value computed across an invalidation is returned
/// to its caller but never stored.
#[derive(Default)]
pub struct SymbolCache {
    loaders: DashMap<String, NamespaceLoader>,
    entries: DashMap<SymbolKey, Symbol>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
}

impl SymbolCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the loader for `namespace`
    ///
    /// Replacing a loader drops whatever was cached from the old one.
    pub fn register<F>(&self, namespace: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<Namespace> + Send + Sync + 'static,
    {
        let namespace = namespace.into();
        if self
            .loaders
            .insert(namespace.clone(), Arc::new(loader))
            .is_some()
        {
            self.invalidate_namespace(&namespace);
        }
    }

    /// Whether a loader is registered for `namespace`
    pub fn is_registered(&self, namespace: &str) -> bool {
        self.loaders.contains_key(namespace)
    }

    /// Resolve a namespace (`symbol = None`) or a symbol inside it
    pub fn resolve(&self, namespace: &str, symbol: Option<&str>) -> Result<Symbol> {
        let key = SymbolKey::new(namespace, symbol);
        if let Some(cached) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Symbol cache hit");
            return Ok(Arc::clone(cached.value()));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let generation = self.generation.load(Ordering::Acquire);

        let value: Symbol = match symbol {
            None => self.load_namespace(namespace)?,
            Some(name) => {
                let loaded = self.resolve_namespace(namespace)?;
                loaded.get(name).ok_or_else(|| {
                    error!(namespace, symbol = name, "Namespace has no such symbol");
                    Error::symbol_not_found(namespace, name)
                })?
            }
        };

        // First insert wins; the generation is checked under the shard lock
        match self.entries.entry(key) {
            Entry::Occupied(stored) => Ok(Arc::clone(stored.get())),
            Entry::Vacant(slot) => {
                if self.generation.load(Ordering::Acquire) == generation {
                    slot.insert(Arc::clone(&value));
                } else {
                    debug!(namespace, "Cache invalidated during load; result not stored");
                }
                Ok(value)
            }
        }
    }

    /// Resolve a namespace
    pub fn resolve_namespace(&self, namespace: &str) -> Result<Arc<Namespace>> {
        self.resolve_as::<Namespace>(namespace, None)
    }

    /// Resolve and downcast to `T`
    pub fn resolve_as<T: Any + Send + Sync>(
        &self,
        namespace: &str,
        symbol: Option<&str>,
    ) -> Result<Arc<T>> {
        self.resolve(namespace, symbol)?
            .downcast::<T>()
            .map_err(|_| Error::SymbolType {
                namespace: namespace.to_string(),
                symbol: symbol.map(str::to_string),
                expected: type_name::<T>(),
            })
    }

    /// Whether `(namespace, symbol)` is currently cached
    pub fn contains(&self, namespace: &str, symbol: Option<&str>) -> bool {
        self.entries.contains_key(&SymbolKey::new(namespace, symbol))
    }

    /// Drop every cached entry; registered loaders are kept
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let dropped = self.entries.len();
        self.entries.clear();
        info!(dropped, "Symbol cache cleared");
    }

    /// Drop cached entries belonging to one namespace
    pub fn invalidate_namespace(&self, namespace: &str) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.entries.retain(|key, _| key.namespace != namespace);
        debug!(namespace, "Symbol cache namespace cleared");
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    /// Cached keys, sorted
    pub fn cached_keys(&self) -> Vec<SymbolKey> {
        let mut keys: Vec<SymbolKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort_by(|a, b| {
            a.namespace
                .cmp(&b.namespace)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        keys
    }

    fn load_namespace(&self, namespace: &str) -> Result<Symbol> {
        // Clone the loader out so no shard lock is held while it runs
        let loader = self
            .loaders
            .get(namespace)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                error!(namespace, "No loader registered for namespace");
                Error::namespace_not_found(namespace)
            })?;

        debug!(namespace, "Loading namespace");
        self.loads.fetch_add(1, Ordering::Relaxed);
        let loaded = loader().inspect_err(|e| {
            error!(namespace, error = %e, "Failed to load namespace");
        })?;
        Ok(Arc::new(loaded))
    }
}

impl fmt::Debug for SymbolCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut namespaces: Vec<String> = self.loaders.iter().map(|e| e.key().clone()).collect();
        namespaces.sort_unstable();
        f.debug_struct("SymbolCache")
            .field("namespaces", &namespaces)
            .field("stats", &self.stats())
            .finish()
    }
}
