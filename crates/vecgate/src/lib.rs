//! # vecgate
//!
//! Lazily selected vector database backends behind one guarded client.
//!
//! A process configures a backend identifier (`memory`, `filesystem`,
//! `qdrant` or `disabled`). Nothing is constructed until the first vector
//! operation; from then on every caller shares the same provider. A disabled
//! backend fails each call with `BackendDisabled` instead of panicking on a
//! missing client.
//!
//! ## Example
//!
//! ```ignore
//! use vecgate::prelude::*;
//!
//! let config = ConfigLoader::new().load()?;
//! let context = VectorDbContext::from_config(&config);
//! let client = context.client();
//!
//! client.create_collection("docs", 384).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type, backend identifiers and the provider traits
//! - `application` - Provider registry and selection
//! - `infrastructure` - Backend slot, symbol cache, config and logging
//! - `providers` - Memory, filesystem and Qdrant implementations

// Force-link vecgate-providers so its linkme registrations are included
extern crate vecgate_providers;

pub mod cli;

/// Domain layer - core types and port traits
pub mod domain {
    pub use vecgate_domain::*;
}

/// Application layer - provider registry
pub mod application {
    pub use vecgate_application::*;
}

/// Infrastructure layer - context, caches, config and logging
pub mod infrastructure {
    pub use vecgate_infrastructure::*;
}

/// Provider implementations linked into this build
pub mod providers {
    pub use vecgate_providers::*;
}

/// Commonly used types
pub mod prelude {
    pub use vecgate_application::ports::registry::{BackendRegistry, VectorStoreProviderConfig};
    pub use vecgate_domain::error::{Error, Result};
    pub use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
    pub use vecgate_domain::value_objects::{Backend, BackendKind, Embedding, SearchResult};
    pub use vecgate_infrastructure::{
        AppConfig, ConfigLoader, InvalidateScope, LazySymbol, SymbolCache, VectorDbClient,
        VectorDbContext,
    };
}
