//! In-memory vector store provider implementation
//!
//! Provides an in-memory vector storage backend for development and testing.
//! Data is not persisted and will be lost on restart.

use super::collection::{StoredCollection, collection_not_found, missing_collection_stats};
use crate::utils::MetadataFilter;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use vecgate_domain::error::{Error, Result};
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::{Embedding, SearchResult};

const PROVIDER_NAME: &str = "memory";

/// In-memory vector store provider
///
/// Stores vectors and metadata in memory using concurrent hash maps.
/// Useful for development and testing where persistence is not required.
pub struct InMemoryVectorStoreProvider {
    collections: Arc<DashMap<String, StoredCollection>>,
}

impl InMemoryVectorStoreProvider {
    /// Create a new in-memory vector store provider
    pub fn new() -> Self {
        Self {
            collections: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryVectorStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStoreAdmin for InMemoryVectorStoreProvider {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.contains_key(name))
    }

    async fn get_stats(&self, collection: &str) -> Result<HashMap<String, Value>> {
        Ok(match self.collections.get(collection) {
            Some(coll) => coll.stats(collection, PROVIDER_NAME),
            None => missing_collection_stats(collection, PROVIDER_NAME),
        })
    }

    async fn flush(&self, _collection: &str) -> Result<()> {
        // No-op for in-memory store
        Ok(())
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStoreProvider {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        match self.collections.entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::vector_db(format!(
                "Collection '{name}' already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(StoredCollection::new(dimensions));
                Ok(())
            }
        }
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections.remove(name);
        Ok(())
    }

    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, Value>>,
    ) -> Result<Vec<String>> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| collection_not_found(collection))?;
        coll.insert(vectors, metadata)
    }

    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let filter = MetadataFilter::parse(filter)?;
        // Return empty results for non-existent collections (graceful degradation)
        let Some(coll) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        coll.search(query_vector, limit, filter.as_ref())
    }

    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| collection_not_found(collection))?;
        coll.delete(ids);
        Ok(())
    }

    async fn get_vectors_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<SearchResult>> {
        let coll = self
            .collections
            .get(collection)
            .ok_or_else(|| collection_not_found(collection))?;
        Ok(coll.get(ids))
    }

    async fn list_vectors(&self, collection: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let coll = self
            .collections
            .get(collection)
            .ok_or_else(|| collection_not_found(collection))?;
        Ok(coll.list(limit))
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use vecgate_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use vecgate_domain::value_objects::BackendKind;

/// Factory function for creating in-memory vector store provider instances.
fn in_memory_vector_store_factory(
    _config: &VectorStoreProviderConfig,
) -> Result<Arc<dyn VectorStoreProvider>> {
    Ok(Arc::new(InMemoryVectorStoreProvider::new()))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static MEMORY_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    kind: BackendKind::Memory,
    description: "In-memory vector store (fast, non-persistent)",
    factory: in_memory_vector_store_factory,
};
