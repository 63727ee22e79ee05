//! Value Objects
//!
//! Immutable types passed between the registry, the providers and callers.

pub mod backend;
pub mod embedding;
pub mod search;

pub use backend::{Backend, BackendKind};
pub use embedding::Embedding;
pub use search::SearchResult;
