//! Filesystem vector store implementation
//!
//! Each collection lives in `<base_path>/<collection>.json`. A collection is
//! read from disk the first time it is touched and written back after every
//! mutation. Nothing touches the disk at construction time.

use super::collection::{StoredCollection, collection_not_found, missing_collection_stats};
use crate::constants::{FILESYSTEM_COLLECTION_EXTENSION, FILESYSTEM_DEFAULT_BASE_PATH};
use crate::utils::MetadataFilter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use vecgate_domain::error::{Error, Result};
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::{Embedding, SearchResult};

const PROVIDER_NAME: &str = "filesystem";

/// Filesystem vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemVectorStoreConfig {
    /// Directory holding one JSON file per collection
    pub base_path: PathBuf,
}

impl Default for FilesystemVectorStoreConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(FILESYSTEM_DEFAULT_BASE_PATH),
        }
    }
}

/// Filesystem vector store implementation
#[derive(Clone)]
pub struct FilesystemVectorStore {
    config: FilesystemVectorStoreConfig,
    /// Collections loaded so far
    collections: Arc<Mutex<HashMap<String, StoredCollection>>>,
}

// File utility helpers
mod file_utils {
    use serde::{Serialize, de::DeserializeOwned};
    use std::path::Path;
    use vecgate_domain::error::{Error, Result};

    pub async fn exists(path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    pub async fn read_json<T: DeserializeOwned>(path: &Path, description: &str) -> Result<T> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to read {description}"), e))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::internal(format!("Failed to parse {description}: {e}")))
    }

    /// Writes a sibling `.tmp` file, then renames it over `path`
    pub async fn write_json_atomic<T: Serialize>(
        path: &Path,
        data: &T,
        description: &str,
    ) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::io_with_source(format!("Failed to create directory for {description}"), e)
            })?;
        }
        let content = serde_json::to_vec(data)
            .map_err(|e| Error::internal(format!("Failed to serialize {description}: {e}")))?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to write {description}"), e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to replace {description}"), e))
    }

    pub async fn remove_if_exists(path: &Path, description: &str) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_source(
                format!("Failed to remove {description}"),
                e,
            )),
        }
    }
}

impl FilesystemVectorStore {
    /// Create a new filesystem vector store
    ///
    /// The base directory is created on the first write.
    pub fn new(config: FilesystemVectorStoreConfig) -> Self {
        Self {
            config,
            collections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Directory this store persists to
    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        validate_collection_name(collection)?;
        Ok(self
            .config
            .base_path
            .join(format!("{collection}.{FILESYSTEM_COLLECTION_EXTENSION}")))
    }

    /// Make sure `collection` is in `loaded`, reading it from disk if needed
    ///
    /// Returns `false` when the collection exists neither in memory nor on disk.
    async fn ensure_loaded(
        &self,
        loaded: &mut HashMap<String, StoredCollection>,
        collection: &str,
    ) -> Result<bool> {
        if loaded.contains_key(collection) {
            return Ok(true);
        }
        let path = self.collection_path(collection)?;
        if !file_utils::exists(&path).await {
            return Ok(false);
        }
        let stored: StoredCollection =
            file_utils::read_json(&path, &format!("collection '{collection}'")).await?;
        debug!(
            collection,
            vectors = stored.len(),
            "Loaded collection from disk"
        );
        loaded.insert(collection.to_string(), stored);
        Ok(true)
    }

    async fn save(&self, collection: &str, stored: &StoredCollection) -> Result<()> {
        let path = self.collection_path(collection)?;
        file_utils::write_json_atomic(&path, stored, &format!("collection '{collection}'")).await
    }
}

/// Names become file names: ASCII alphanumerics plus `-_.`, no leading dot
fn validate_collection_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "Invalid collection name '{name}'"
        )))
    }
}

#[async_trait]
impl VectorStoreAdmin for FilesystemVectorStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let mut loaded = self.collections.lock().await;
        self.ensure_loaded(&mut loaded, name).await
    }

    async fn get_stats(&self, collection: &str) -> Result<HashMap<String, Value>> {
        let mut loaded = self.collections.lock().await;
        if !self.ensure_loaded(&mut loaded, collection).await? {
            return Ok(missing_collection_stats(collection, PROVIDER_NAME));
        }
        let mut stats = match loaded.get(collection) {
            Some(stored) => stored.stats(collection, PROVIDER_NAME),
            None => missing_collection_stats(collection, PROVIDER_NAME),
        };
        stats.insert(
            "path".to_string(),
            serde_json::json!(self.collection_path(collection)?.display().to_string()),
        );
        Ok(stats)
    }

    async fn flush(&self, collection: &str) -> Result<()> {
        let loaded = self.collections.lock().await;
        if let Some(stored) = loaded.get(collection) {
            self.save(collection, stored).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        match tokio::fs::metadata(&self.config.base_path).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(Error::io(format!(
                "Vector store path {} is not a directory",
                self.config.base_path.display()
            ))),
            // Created lazily on first write
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_source("Vector store path is unreadable", e)),
        }
    }
}

#[async_trait]
impl VectorStoreProvider for FilesystemVectorStore {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let mut loaded = self.collections.lock().await;
        if self.ensure_loaded(&mut loaded, name).await? {
            return Err(Error::vector_db(format!(
                "Collection '{name}' already exists"
            )));
        }
        let stored = StoredCollection::new(dimensions);
        self.save(name, &stored).await?;
        loaded.insert(name.to_string(), stored);
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let path = self.collection_path(name)?;
        let mut loaded = self.collections.lock().await;
        loaded.remove(name);
        file_utils::remove_if_exists(&path, &format!("collection '{name}'")).await
    }

    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, Value>>,
    ) -> Result<Vec<String>> {
        let mut loaded = self.collections.lock().await;
        if !self.ensure_loaded(&mut loaded, collection).await? {
            return Err(collection_not_found(collection));
        }
        let stored = loaded
            .get_mut(collection)
            .ok_or_else(|| collection_not_found(collection))?;

        // Memory is only updated once the write succeeded
        let mut updated = stored.clone();
        let ids = updated.insert(vectors, metadata)?;
        self.save(collection, &updated).await?;
        *stored = updated;
        Ok(ids)
    }

    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let filter = MetadataFilter::parse(filter)?;
        let mut loaded = self.collections.lock().await;
        if !self.ensure_loaded(&mut loaded, collection).await? {
            return Ok(Vec::new());
        }
        match loaded.get(collection) {
            Some(stored) => stored.search(query_vector, limit, filter.as_ref()),
            None => Ok(Vec::new()),
        }
    }

    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()> {
        let mut loaded = self.collections.lock().await;
        if !self.ensure_loaded(&mut loaded, collection).await? {
            return Err(collection_not_found(collection));
        }
        let stored = loaded
            .get_mut(collection)
            .ok_or_else(|| collection_not_found(collection))?;

        let mut updated = stored.clone();
        if updated.delete(ids) > 0 {
            self.save(collection, &updated).await?;
            *stored = updated;
        }
        Ok(())
    }

    async fn get_vectors_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<SearchResult>> {
        let mut loaded = self.collections.lock().await;
        if !self.ensure_loaded(&mut loaded, collection).await? {
            return Err(collection_not_found(collection));
        }
        loaded
            .get(collection)
            .map(|stored| stored.get(ids))
            .ok_or_else(|| collection_not_found(collection))
    }

    async fn list_vectors(&self, collection: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let mut loaded = self.collections.lock().await;
        if !self.ensure_loaded(&mut loaded, collection).await? {
            return Err(collection_not_found(collection));
        }
        loaded
            .get(collection)
            .map(|stored| stored.list(limit))
            .ok_or_else(|| collection_not_found(collection))
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use vecgate_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use vecgate_domain::value_objects::BackendKind;

/// Factory function for creating filesystem vector store provider instances.
fn filesystem_factory(config: &VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>> {
    let base_path = config
        .uri
        .as_deref()
        .map(|uri| uri.strip_prefix("file://").unwrap_or(uri))
        .unwrap_or(FILESYSTEM_DEFAULT_BASE_PATH);

    Ok(Arc::new(FilesystemVectorStore::new(
        FilesystemVectorStoreConfig {
            base_path: PathBuf::from(base_path),
        },
    )))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static FILESYSTEM_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    kind: BackendKind::Filesystem,
    description: "Filesystem-based vector store (persistent, one JSON file per collection)",
    factory: filesystem_factory,
};
