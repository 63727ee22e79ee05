//! Application Layer - vecgate
//!
//! Owns the backend registry: the table that maps each [`BackendKind`] to
//! the factory able to construct it. Concrete providers are not a
//! dependency of this crate; they register themselves into
//! [`ports::registry::VECTOR_STORE_PROVIDERS`] at link time.
//!
//! [`BackendKind`]: vecgate_domain::BackendKind

pub mod ports;

pub use ports::registry::{
    BackendFactory, BackendRegistry, VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig,
    VectorStoreProviderEntry, list_vector_store_providers,
};
