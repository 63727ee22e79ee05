//! Search-Related Value Objects

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Value Object: Ranked Search Result
///
/// A single hit returned by a vector store. Scores are normalized to
/// `0.0..=1.0`, higher is more similar; lookups by id report `1.0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Identifier assigned by the vector store on insert
    pub id: String,
    /// Similarity score
    pub score: f64,
    /// Metadata stored alongside the vector
    pub metadata: HashMap<String, Value>,
}

impl SearchResult {
    /// Create a search result
    pub fn new(id: impl Into<String>, score: f64, metadata: HashMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            score,
            metadata,
        }
    }
}
