//! Vector Store Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | InMemoryVectorStoreProvider | Local | In-memory storage (non-persistent) |
//! | FilesystemVectorStore | Local | One JSON file per collection |
//! | QdrantVectorStoreProvider | Remote | Qdrant REST API, optional multitenancy |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `InMemoryVectorStoreProvider`
//! - **Single-host persistence**: Use `FilesystemVectorStore`
//! - **Production**: Use `QdrantVectorStoreProvider`

#[cfg(any(feature = "vectorstore-memory", feature = "vectorstore-filesystem"))]
mod collection;
#[cfg(feature = "vectorstore-filesystem")]
pub mod filesystem;
#[cfg(feature = "vectorstore-memory")]
pub mod in_memory;
#[cfg(feature = "vectorstore-qdrant")]
pub mod qdrant;

// Re-export for convenience
#[cfg(feature = "vectorstore-filesystem")]
pub use filesystem::{FilesystemVectorStore, FilesystemVectorStoreConfig};
#[cfg(feature = "vectorstore-memory")]
pub use in_memory::InMemoryVectorStoreProvider;
#[cfg(feature = "vectorstore-qdrant")]
pub use qdrant::{QdrantConfig, QdrantVectorStoreProvider};
