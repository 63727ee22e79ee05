//! Ports owned by the application layer

pub mod registry;

// Re-export provider ports for convenience
pub use vecgate_domain::ports::providers;
