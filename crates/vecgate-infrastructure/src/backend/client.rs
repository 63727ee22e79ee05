//! Guarded vector database client
//!
//! [`VectorDbClient`] is what the rest of an application holds. It is a
//! `VectorStoreProvider` itself; each call resolves the shared backend slot
//! and forwards, or fails with `BackendDisabled` before any backend code runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use vecgate_domain::error::Result;
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::{Backend, Embedding, SearchResult};

use super::singleton::BackendSingleton;

/// Forwarding handle over a [`BackendSingleton`]
///
/// Cheap to clone; clones share the slot.
#[derive(Clone, Debug)]
pub struct VectorDbClient {
    singleton: Arc<BackendSingleton>,
}

impl VectorDbClient {
    /// Client over `singleton`
    pub fn new(singleton: Arc<BackendSingleton>) -> Self {
        Self { singleton }
    }

    /// The selected backend, constructing it if needed
    pub async fn backend(&self) -> Result<Backend> {
        self.singleton.get().await
    }

    /// Whether the configured backend is the disabled sentinel
    ///
    /// Triggers selection on first call.
    pub async fn is_disabled(&self) -> Result<bool> {
        Ok(self.singleton.get().await?.is_disabled())
    }

    async fn target(&self) -> Result<Arc<dyn VectorStoreProvider>> {
        self.singleton.provider().await
    }
}

#[async_trait]
impl VectorStoreAdmin for VectorDbClient {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        self.target().await?.collection_exists(name).await
    }

    async fn get_stats(&self, collection: &str) -> Result<HashMap<String, Value>> {
        self.target().await?.get_stats(collection).await
    }

    async fn flush(&self, collection: &str) -> Result<()> {
        self.target().await?.flush(collection).await
    }

    async fn health_check(&self) -> Result<()> {
        self.target().await?.health_check().await
    }
}

#[async_trait]
impl VectorStoreProvider for VectorDbClient {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        self.target().await?.create_collection(name, dimensions).await
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.target().await?.delete_collection(name).await
    }

    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, Value>>,
    ) -> Result<Vec<String>> {
        self.target()
            .await?
            .insert_vectors(collection, vectors, metadata)
            .await
    }

    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        self.target()
            .await?
            .search_similar(collection, query_vector, limit, filter)
            .await
    }

    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()> {
        self.target().await?.delete_vectors(collection, ids).await
    }

    async fn get_vectors_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<SearchResult>> {
        self.target()
            .await?
            .get_vectors_by_ids(collection, ids)
            .await
    }

    async fn list_vectors(&self, collection: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.target().await?.list_vectors(collection, limit).await
    }
}
