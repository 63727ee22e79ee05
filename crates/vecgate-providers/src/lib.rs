// Allow collapsible_if for complex conditional logic
#![allow(clippy::collapsible_if)]

//! # vecgate - Provider Implementations
//!
//! Concrete vector store backends. Each one implements
//! `VectorStoreProvider` from `vecgate-domain` and registers a factory in
//! the linkme slice declared by `vecgate-application`.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `InMemoryVectorStoreProvider` | `vectorstore-memory` | Non-persistent, in-process |
//! | `FilesystemVectorStore` | `vectorstore-filesystem` | JSON files on local disk |
//! | `QdrantVectorStoreProvider` | `vectorstore-qdrant` | Qdrant REST API, optional multitenancy |
//!
//! ## Feature Flags
//!
//! A provider whose feature is off is not compiled, so its dependencies are
//! never linked and it has no registry entry:
//!
//! ```toml
//! [dependencies]
//! vecgate-providers = { version = "0.1", default-features = false, features = ["vectorstore-qdrant"] }
//! ```

// Re-export vecgate-domain types commonly used with providers
pub use vecgate_domain::error::{Error, Result};
pub use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Vector store provider implementations
pub mod vector_store;
