//! Configuration management
//!
//! Layered loading (defaults, TOML file, environment) via figment, plus the
//! typed configuration tree.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, LoggingConfig, VectorDbConfig};
