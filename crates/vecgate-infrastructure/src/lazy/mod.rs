//! Lazy loading
//!
//! [`SymbolCache`] resolves registered namespaces on demand and keeps the
//! results; [`LazySymbol`] is a handle that resolves through it on first
//! access.

pub mod proxy;
pub mod symbol_cache;

pub use proxy::LazySymbol;
pub use symbol_cache::{CacheStats, Namespace, Symbol, SymbolCache, SymbolKey};
