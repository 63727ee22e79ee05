//! # vecgate Domain Layer
//!
//! Core types shared by every other crate in the workspace:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`value_objects`] | Embeddings, search results, backend identifiers |
//! | [`ports`] | Capability traits that vector store backends implement |
//! | [`constants`] | Shared defaults |
//!
//! This crate has no knowledge of concrete backends. Providers live in
//! `vecgate-providers` and are selected at runtime by the registry in
//! `vecgate-application`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{Backend, BackendKind, Embedding, SearchResult};
