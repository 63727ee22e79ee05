//! Qdrant Vector Store Provider
//!
//! Talks to Qdrant over its REST API. The HTTP client is built on the first
//! request, so constructing the provider never touches the network.
//!
//! ## Collection layout
//!
//! | Mode | Logical `docs` maps to | Isolation |
//! |------|------------------------|-----------|
//! | default | `<prefix>_docs` | one Qdrant collection each |
//! | multitenancy | `<prefix>_shared` | `tenant_id` payload field + filter |

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tracing::debug;

use vecgate_domain::constants::METADATA_ID_KEY;
use vecgate_domain::error::{Error, Result};
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::{Embedding, SearchResult};

use crate::constants::{
    QDRANT_API_KEY_HEADER, QDRANT_DEFAULT_COLLECTION_PREFIX, QDRANT_DEFAULT_URL,
    QDRANT_MULTITENANCY_KEY, QDRANT_REQUEST_TIMEOUT_SECS, QDRANT_SHARED_COLLECTION_SUFFIX,
    QDRANT_TENANT_FIELD,
};
use crate::utils::{JsonExt, MetadataFilter};

const PROVIDER_NAME: &str = "qdrant";

/// Qdrant connection settings
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    /// REST endpoint (e.g., "http://localhost:6333")
    pub url: String,
    /// Optional API key sent as the `api-key` header
    pub api_key: Option<String>,
    /// Prefix applied to every physical collection name
    pub collection_prefix: String,
    /// Store all logical collections in one shared collection
    pub multitenancy: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: QDRANT_DEFAULT_URL.to_string(),
            api_key: None,
            collection_prefix: QDRANT_DEFAULT_COLLECTION_PREFIX.to_string(),
            multitenancy: false,
            timeout: Duration::from_secs(QDRANT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Qdrant vector store provider
pub struct QdrantVectorStoreProvider {
    config: QdrantConfig,
    client: OnceCell<Client>,
}

impl QdrantVectorStoreProvider {
    /// Create a provider; no connection is made until the first call
    pub fn new(config: QdrantConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Whether logical collections share one physical collection
    pub fn is_multitenant(&self) -> bool {
        self.config.multitenancy
    }

    async fn client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                let mut headers = HeaderMap::new();
                if let Some(key) = &self.config.api_key {
                    let value = HeaderValue::from_str(key).map_err(|e| {
                        Error::configuration_with_source("Qdrant API key is not a valid header", e)
                    })?;
                    headers.insert(QDRANT_API_KEY_HEADER, value);
                }
                let client = Client::builder()
                    .timeout(self.config.timeout)
                    .default_headers(headers)
                    .build()
                    .map_err(|e| {
                        Error::network_with_source("Failed to build Qdrant HTTP client", e)
                    })?;
                debug!(url = %self.config.url, "Qdrant HTTP client initialized");
                Ok(client)
            })
            .await
    }

    /// Physical collection backing `collection`
    fn physical_name(&self, collection: &str) -> String {
        if self.config.multitenancy {
            format!(
                "{}_{}",
                self.config.collection_prefix, QDRANT_SHARED_COLLECTION_SUFFIX
            )
        } else {
            format!("{}_{}", self.config.collection_prefix, collection)
        }
    }

    /// Conditions scoping a request to `collection` (empty outside multitenancy)
    fn tenant_conditions(&self, collection: &str) -> Vec<Value> {
        if self.config.multitenancy {
            vec![json!({ "key": QDRANT_TENANT_FIELD, "match": { "value": collection } })]
        } else {
            Vec::new()
        }
    }

    fn build_filter(&self, collection: &str, extra: Vec<Value>) -> Option<Value> {
        let mut must = self.tenant_conditions(collection);
        must.extend(extra);
        if must.is_empty() {
            None
        } else {
            Some(json!({ "must": must }))
        }
    }

    /// Send a request and return the `result` field
    ///
    /// `Ok(None)` means Qdrant answered 404.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Option<Value>> {
        let url = format!("{}/{}", self.config.url.trim_end_matches('/'), path);
        let mut request = self.client().await?.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("Qdrant request to {path} failed"), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::vector_db(format!(
                "Qdrant request to {path} failed ({}): {error_text}",
                status.as_u16()
            )));
        }

        let mut payload: Value = response
            .json()
            .await
            .map_err(|e| Error::network_with_source("Invalid Qdrant response body", e))?;
        Ok(Some(payload.get_mut("result").map(Value::take).unwrap_or(Value::Null)))
    }

    /// Like [`request`](Self::request) but a 404 is reported as a missing collection
    async fn request_existing(
        &self,
        method: Method,
        collection: &str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        self.request(method, path, body)
            .await?
            .ok_or_else(|| Error::vector_db(format!("Collection '{collection}' not found")))
    }

    async fn physical_exists(&self, physical: &str) -> Result<bool> {
        Ok(self
            .request(Method::GET, &format!("collections/{physical}"), None)
            .await?
            .is_some())
    }

    async fn count(&self, physical: &str, filter: Option<Value>) -> Result<u64> {
        let mut body = json!({ "exact": true });
        if let Some(filter) = filter {
            body["filter"] = filter;
        }
        let result = self
            .request(Method::POST, &format!("collections/{physical}/points/count"), Some(body))
            .await?;
        Ok(result.map(|r| r.u64_or("count", 0)).unwrap_or(0))
    }

    fn to_search_result(&self, point: &Value, score: f64) -> Option<SearchResult> {
        let id = match point.get("id")? {
            Value::String(id) => id.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let mut metadata: HashMap<String, Value> = point
            .get("payload")
            .and_then(Value::as_object)
            .map(|payload| payload.clone().into_iter().collect())
            .unwrap_or_default();
        if self.config.multitenancy {
            metadata.remove(QDRANT_TENANT_FIELD);
        }
        Some(SearchResult::new(id, score, metadata))
    }

    fn points_to_results(&self, points: &Value) -> Vec<SearchResult> {
        points
            .as_array()
            .map(|points| {
                points
                    .iter()
                    .filter_map(|point| self.to_search_result(point, 1.0))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Map Qdrant's cosine score from `[-1, 1]` to `[0, 1]`
fn normalize_score(score: f64) -> f64 {
    (score + 1.0) / 2.0
}

#[async_trait]
impl VectorStoreAdmin for QdrantVectorStoreProvider {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let physical = self.physical_name(name);
        if !self.physical_exists(&physical).await? {
            return Ok(false);
        }
        if !self.config.multitenancy {
            return Ok(true);
        }
        let filter = self.build_filter(name, Vec::new());
        Ok(self.count(&physical, filter).await? > 0)
    }

    async fn get_stats(&self, collection: &str) -> Result<HashMap<String, Value>> {
        let physical = self.physical_name(collection);
        let info = self
            .request(Method::GET, &format!("collections/{physical}"), None)
            .await?;

        let mut stats = HashMap::new();
        stats.insert("collection".to_string(), json!(collection));
        stats.insert("provider".to_string(), json!(PROVIDER_NAME));
        stats.insert("physical_collection".to_string(), json!(physical));

        let Some(info) = info else {
            stats.insert("status".to_string(), json!("missing"));
            stats.insert("vectors_count".to_string(), json!(0));
            return Ok(stats);
        };

        let vectors_count = if self.config.multitenancy {
            let filter = self.build_filter(collection, Vec::new());
            self.count(&physical, filter).await?
        } else {
            info.u64_or("points_count", 0)
        };
        stats.insert("status".to_string(), json!(info.str_or("status", "unknown")));
        stats.insert("vectors_count".to_string(), json!(vectors_count));
        Ok(stats)
    }

    async fn flush(&self, _collection: &str) -> Result<()> {
        // Writes are sent with wait=true
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        // healthz answers plain text, not the usual JSON envelope
        let url = format!("{}/healthz", self.config.url.trim_end_matches('/'));
        let response = self
            .client()
            .await?
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network_with_source("Qdrant health check failed", e))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::vector_db(format!(
                "Qdrant health check returned {}",
                response.status().as_u16()
            )))
        }
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantVectorStoreProvider {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let physical = self.physical_name(name);
        let exists = self.physical_exists(&physical).await?;

        if exists && !self.config.multitenancy {
            return Err(Error::vector_db(format!(
                "Collection '{name}' already exists"
            )));
        }
        if !exists {
            let body = json!({ "vectors": { "size": dimensions, "distance": "Cosine" } });
            self.request(Method::PUT, &format!("collections/{physical}"), Some(body))
                .await?;

            if self.config.multitenancy {
                let index = json!({ "field_name": QDRANT_TENANT_FIELD, "field_schema": "keyword" });
                self.request(
                    Method::PUT,
                    &format!("collections/{physical}/index?wait=true"),
                    Some(index),
                )
                .await?;
            }
            debug!(collection = name, physical = %physical, dimensions, "Created Qdrant collection");
        }
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let physical = self.physical_name(name);
        if self.config.multitenancy {
            let Some(filter) = self.build_filter(name, Vec::new()) else {
                return Ok(());
            };
            self.request(
                Method::POST,
                &format!("collections/{physical}/points/delete?wait=true"),
                Some(json!({ "filter": filter })),
            )
            .await?;
        } else {
            self.request(Method::DELETE, &format!("collections/{physical}"), None)
                .await?;
        }
        Ok(())
    }

    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, Value>>,
    ) -> Result<Vec<String>> {
        if metadata.len() != vectors.len() {
            return Err(Error::invalid_argument(format!(
                "Got {} vectors but {} metadata entries",
                vectors.len(),
                metadata.len()
            )));
        }
        if vectors.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::with_capacity(vectors.len());
        let points: Vec<Value> = vectors
            .iter()
            .zip(metadata)
            .map(|(embedding, mut payload)| {
                let id = uuid::Uuid::new_v4().to_string();
                payload.insert(METADATA_ID_KEY.to_string(), json!(id));
                if self.config.multitenancy {
                    payload.insert(QDRANT_TENANT_FIELD.to_string(), json!(collection));
                }
                ids.push(id.clone());
                json!({ "id": id, "vector": embedding.vector, "payload": payload })
            })
            .collect();

        let physical = self.physical_name(collection);
        self.request_existing(
            Method::PUT,
            collection,
            &format!("collections/{physical}/points?wait=true"),
            Some(json!({ "points": points })),
        )
        .await?;
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
        if limit == 0 {
            return Ok(Vec::new());
        }

        let extra = filter
            .map(|f| vec![json!({ "key": f.key, "match": { "value": f.value } })])
            .unwrap_or_default();
        let mut body = json!({ "vector": query_vector, "limit": limit, "with_payload": true });
        if let Some(filter) = self.build_filter(collection, extra) {
            body["filter"] = filter;
        }

        let physical = self.physical_name(collection);
        // Missing collections search as empty
        let Some(result) = self
            .request(
                Method::POST,
                &format!("collections/{physical}/points/search"),
                Some(body),
            )
            .await?
        else {
            return Ok(Vec::new());
        };

        Ok(result
            .as_array()
            .map(|points| {
                points
                    .iter()
                    .filter_map(|point| {
                        let score = point.get("score").and_then(Value::as_f64).unwrap_or(0.0);
                        self.to_search_result(point, normalize_score(score))
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let physical = self.physical_name(collection);
        let body = match self.build_filter(collection, vec![json!({ "has_id": ids })]) {
            Some(filter) if self.config.multitenancy => json!({ "filter": filter }),
            _ => json!({ "points": ids }),
        };
        self.request_existing(
            Method::POST,
            collection,
            &format!("collections/{physical}/points/delete?wait=true"),
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn get_vectors_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<SearchResult>> {
        let physical = self.physical_name(collection);
        let result = self
            .request_existing(
                Method::POST,
                collection,
                &format!("collections/{physical}/points"),
                Some(json!({ "ids": ids, "with_payload": true })),
            )
            .await?;

        let points = match result {
            Value::Array(points) if self.config.multitenancy => Value::Array(
                points
                    .into_iter()
                    .filter(|point| {
                        point
                            .get("payload")
                            .and_then(|p| p.opt_str(QDRANT_TENANT_FIELD))
                            .is_some_and(|tenant| tenant == collection)
                    })
                    .collect(),
            ),
            other => other,
        };
        Ok(self.points_to_results(&points))
    }

    async fn list_vectors(&self, collection: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let physical = self.physical_name(collection);
        let mut body = json!({ "limit": limit, "with_payload": true });
        if let Some(filter) = self.build_filter(collection, Vec::new()) {
            body["filter"] = filter;
        }
        let result = self
            .request_existing(
                Method::POST,
                collection,
                &format!("collections/{physical}/points/scroll"),
                Some(body),
            )
            .await?;
        Ok(result
            .get("points")
            .map(|points| self.points_to_results(points))
            .unwrap_or_default())
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use vecgate_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use vecgate_domain::value_objects::BackendKind;

fn qdrant_config_from(config: &VectorStoreProviderConfig) -> QdrantConfig {
    let defaults = QdrantConfig::default();
    QdrantConfig {
        url: config.uri.clone().unwrap_or(defaults.url),
        api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        collection_prefix: config
            .collection_prefix
            .clone()
            .unwrap_or(defaults.collection_prefix),
        multitenancy: config.extra_flag(QDRANT_MULTITENANCY_KEY),
        timeout: defaults.timeout,
    }
}

/// Factory function for creating Qdrant provider instances.
fn qdrant_factory(config: &VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>> {
    let qdrant_config = qdrant_config_from(config);
    debug!(
        url = %qdrant_config.url,
        multitenancy = qdrant_config.multitenancy,
        "Configuring Qdrant provider"
    );
    Ok(Arc::new(QdrantVectorStoreProvider::new(qdrant_config)))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static QDRANT_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    kind: BackendKind::Qdrant,
    description: "Qdrant vector database over REST (optional multitenancy)",
    factory: qdrant_factory,
};
