//! Shared utilities for provider implementations

pub mod filter;
pub mod json;
pub mod similarity;

pub use filter::MetadataFilter;
pub use json::JsonExt;
pub use similarity::{compute_norm, cosine_similarity_with_norm};
