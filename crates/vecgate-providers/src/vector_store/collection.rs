//! Collection storage shared by the local providers
//!
//! The in-memory and filesystem providers keep the same structure; the
//! filesystem one additionally serializes it to disk.

use crate::utils::{MetadataFilter, compute_norm, cosine_similarity_with_norm};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use vecgate_domain::constants::METADATA_ID_KEY;
use vecgate_domain::error::{Error, Result};
use vecgate_domain::value_objects::{Embedding, SearchResult};

/// One stored vector with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredVector {
    pub id: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// A named set of vectors of one dimensionality
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoredCollection {
    pub dimensions: usize,
    #[serde(default)]
    pub vectors: Vec<StoredVector>,
}

impl StoredCollection {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Append vectors, returning freshly generated ids
    pub fn insert(
        &mut self,
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
        for embedding in vectors {
            self.check_dimensions(embedding.vector.len())?;
        }

        let mut ids = Vec::with_capacity(vectors.len());
        for (embedding, mut meta) in vectors.iter().zip(metadata) {
            let id = uuid::Uuid::new_v4().to_string();
            meta.insert(METADATA_ID_KEY.to_string(), Value::String(id.clone()));
            self.vectors.push(StoredVector {
                id: id.clone(),
                vector: embedding.vector.clone(),
                metadata: meta,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    /// Top-`limit` vectors by cosine similarity, best first
    pub fn search(
        &self,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>> {
        self.check_dimensions(query_vector.len())?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        // Precompute query norm once
        let query_norm = compute_norm(query_vector);

        // Min-heap for top-k selection: O(n log k)
        let mut heap: BinaryHeap<ScoredItem> = BinaryHeap::with_capacity(limit + 1);

        for (index, stored) in self.vectors.iter().enumerate() {
            if filter.is_some_and(|f| !f.matches(&stored.metadata)) {
                continue;
            }
            let score = cosine_similarity_with_norm(query_vector, &stored.vector, query_norm);

            if heap.len() < limit {
                heap.push(ScoredItem { score, index });
            } else if let Some(min) = heap.peek() {
                if score > min.score {
                    heap.pop();
                    heap.push(ScoredItem { score, index });
                }
            }
        }

        let mut items: Vec<_> = heap.into_vec();
        items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(items
            .into_iter()
            .map(|item| to_search_result(&self.vectors[item.index], f64::from(item.score)))
            .collect())
    }

    /// Remove vectors by id, returning how many were removed
    pub fn delete(&mut self, ids: &[String]) -> usize {
        let before = self.vectors.len();
        self.vectors.retain(|stored| !ids.contains(&stored.id));
        before - self.vectors.len()
    }

    pub fn get(&self, ids: &[String]) -> Vec<SearchResult> {
        self.vectors
            .iter()
            .filter(|stored| ids.contains(&stored.id))
            .map(|stored| to_search_result(stored, 1.0))
            .collect()
    }

    pub fn list(&self, limit: usize) -> Vec<SearchResult> {
        self.vectors
            .iter()
            .take(limit)
            .map(|stored| to_search_result(stored, 1.0))
            .collect()
    }

    pub fn stats(&self, collection: &str, provider: &str) -> HashMap<String, Value> {
        let mut stats = HashMap::new();
        stats.insert("collection".to_string(), serde_json::json!(collection));
        stats.insert("status".to_string(), serde_json::json!("active"));
        stats.insert("vectors_count".to_string(), serde_json::json!(self.len()));
        stats.insert("dimensions".to_string(), serde_json::json!(self.dimensions));
        stats.insert("provider".to_string(), serde_json::json!(provider));
        stats
    }

    fn check_dimensions(&self, got: usize) -> Result<()> {
        if self.dimensions != 0 && got != self.dimensions {
            return Err(Error::invalid_argument(format!(
                "Vector has {got} dimensions, collection expects {}",
                self.dimensions
            )));
        }
        Ok(())
    }
}

/// Stats reported for a collection that does not exist
pub(crate) fn missing_collection_stats(collection: &str, provider: &str) -> HashMap<String, Value> {
    let mut stats = HashMap::new();
    stats.insert("collection".to_string(), serde_json::json!(collection));
    stats.insert("status".to_string(), serde_json::json!("missing"));
    stats.insert("vectors_count".to_string(), serde_json::json!(0));
    stats.insert("provider".to_string(), serde_json::json!(provider));
    stats
}

pub(crate) fn collection_not_found(collection: &str) -> Error {
    Error::vector_db(format!("Collection '{collection}' not found"))
}

fn to_search_result(stored: &StoredVector, score: f64) -> SearchResult {
    SearchResult::new(stored.id.clone(), score, stored.metadata.clone())
}

/// Scored item for heap-based top-k selection
///
/// Uses reverse ordering so BinaryHeap acts as a min-heap (smallest scores at top).
#[derive(PartialEq)]
struct ScoredItem {
    score: f32,
    index: usize,
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
