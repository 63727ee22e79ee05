//! Configuration types

mod app;
mod logging;
mod vector_db;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use vector_db::VectorDbConfig;
