//! # vecgate - Infrastructure Layer
//!
//! Runtime side of backend selection plus the cross-cutting concerns:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`backend`] | Backend slot, guarded client, process context |
//! | [`lazy`] | Symbol cache and lazy handles |
//! | [`config`] | Layered configuration (figment) |
//! | [`logging`] | tracing subscriber setup |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod backend;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod lazy;
pub mod logging;

pub use backend::{BackendSingleton, InvalidateScope, VectorDbClient, VectorDbContext};
pub use config::{AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig, VectorDbConfig};
pub use error_ext::ErrorContext;
pub use lazy::{CacheStats, LazySymbol, Namespace, SymbolCache, SymbolKey};
