use crate::constants::HEALTH_CHECK_COLLECTION;
use crate::error::Result;
use crate::value_objects::{Embedding, SearchResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Vector Store Administrative Operations
///
/// Monitoring and maintenance operations, kept apart from the data-path
/// operations in [`VectorStoreProvider`].
///
/// # Example
///
/// ```ignore
/// if provider.collection_exists("documents").await? {
///     let stats = provider.get_stats("documents").await?;
///     println!("Collection has {} vectors", stats["vectors_count"]);
///     provider.flush("documents").await?;
/// }
/// ```
#[async_trait]
pub trait VectorStoreAdmin: Send + Sync {
    /// Check if a collection exists
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Get statistics about a collection
    async fn get_stats(&self, collection: &str) -> Result<HashMap<String, Value>>;

    /// Flush pending operations for a collection
    async fn flush(&self, collection: &str) -> Result<()>;

    /// Health check for the provider (default implementation)
    async fn health_check(&self) -> Result<()> {
        self.collection_exists(HEALTH_CHECK_COLLECTION).await?;
        Ok(())
    }
}

/// Vector Storage Interface
///
/// The capability set every backend exposes. Callers never hold a concrete
/// backend type; they hold an `Arc<dyn VectorStoreProvider>`, usually the
/// guarded client that forwards to whichever backend configuration selected.
///
/// # Example
///
/// ```ignore
/// provider.create_collection("documents", 384).await?;
/// let ids = provider.insert_vectors("documents", &embeddings, metadata).await?;
/// let hits = provider.search_similar("documents", &query, 10, None).await?;
/// ```
#[async_trait]
pub trait VectorStoreProvider: VectorStoreAdmin + Send + Sync {
    /// Create a new vector collection with specified dimensions
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete an existing vector collection
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Insert vectors into a collection with associated metadata
    ///
    /// `metadata` is matched to `vectors` by position. Returns the ids
    /// assigned to each inserted vector, in order.
    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, Value>>,
    ) -> Result<Vec<String>>;

    /// Search for the `limit` vectors most similar to `query_vector`
    ///
    /// Results are ordered by descending score. `filter`, when given, is a
    /// `key=value` metadata equality constraint.
    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<SearchResult>>;

    /// Delete vectors by id
    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()>;

    /// Fetch vectors by id
    async fn get_vectors_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<SearchResult>>;

    /// List up to `limit` vectors in a collection
    async fn list_vectors(&self, collection: &str, limit: usize) -> Result<Vec<SearchResult>>;
}
