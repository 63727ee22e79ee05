//! Provider ports

pub mod vector_store;

pub use vector_store::{VectorStoreAdmin, VectorStoreProvider};
