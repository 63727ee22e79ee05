//! Vector database backend access
//!
//! - [`BackendSingleton`]: one slot, constructed on first use
//! - [`VectorDbClient`]: `VectorStoreProvider` that forwards through the slot
//! - [`VectorDbContext`]: owns registry, slot and symbol cache

pub mod client;
pub mod context;
pub mod singleton;

pub use client::VectorDbClient;
pub use context::{InvalidateScope, VectorDbContext};
pub use singleton::BackendSingleton;
