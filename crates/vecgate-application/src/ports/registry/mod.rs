//! Provider Registry System
//!
//! Compile-time registration of vector store providers with runtime
//! selection by configuration.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(PROVIDERS)]  │
//! │                        static ENTRY: ProviderEntry = ...        │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static PROVIDERS: [Entry] = [..]     │
//! │                              ↓                                  │
//! │  3. BackendRegistry::linked() copies entries into a table       │
//! │                              ↓                                  │
//! │  4. Config selects:    "backend = qdrant" → qdrant factory      │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the selected factory ever runs. Providers that are not compiled in
//! (their cargo feature is off) simply have no entry.

pub mod vector_store;

pub use vector_store::{
    BackendFactory, BackendRegistry, VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig,
    VectorStoreProviderEntry, list_vector_store_providers,
};
