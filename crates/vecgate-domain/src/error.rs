//! Error handling types

use crate::value_objects::BackendKind;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vecgate
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Vector database operation error
    #[error("Vector database error: {message}")]
    VectorDb {
        /// Description of the vector database error
        message: String,
    },

    /// Configuration-related error (simple form)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure error (with source)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A namespace or a symbol inside it could not be resolved
    #[error("Symbol not found: {}", qualified_name(.namespace, .symbol.as_deref()))]
    SymbolNotFound {
        /// Namespace that was looked up
        namespace: String,
        /// Symbol inside the namespace, `None` when the namespace itself is missing
        symbol: Option<String>,
    },

    /// A resolved symbol does not have the requested type
    #[error(
        "Symbol {} is not a {expected}",
        qualified_name(.namespace, .symbol.as_deref())
    )]
    SymbolType {
        /// Namespace of the symbol
        namespace: String,
        /// Symbol name, `None` for the namespace itself
        symbol: Option<String>,
        /// Requested Rust type name
        expected: &'static str,
    },

    /// Backend identifier outside the supported set
    #[error("Unsupported vector backend: {identifier}")]
    UnsupportedBackend {
        /// The identifier as it was configured
        identifier: String,
    },

    /// Backend is supported but no provider for it is linked into this build
    #[error(
        "No provider linked for vector backend '{kind}'. Available providers: [{}]",
        join_kinds(.available)
    )]
    BackendUnavailable {
        /// The requested backend
        kind: BackendKind,
        /// Backends that do have a linked provider
        available: Vec<BackendKind>,
    },

    /// The configured backend is `disabled`
    #[error("Vector database is disabled")]
    BackendDisabled,
}

fn qualified_name(namespace: &str, symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) => format!("{namespace}::{symbol}"),
        None => namespace.to_string(),
    }
}

fn join_kinds(kinds: &[BackendKind]) -> String {
    kinds
        .iter()
        .map(BackendKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Returns true for the expected "feature turned off" condition
    pub fn is_backend_disabled(&self) -> bool {
        matches!(self, Self::BackendDisabled)
    }

    /// Returns true when a namespace or symbol lookup failed
    pub fn is_symbol_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound { .. })
    }
}

// Lookup error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a missing namespace error
    pub fn namespace_not_found<S: Into<String>>(namespace: S) -> Self {
        Self::SymbolNotFound {
            namespace: namespace.into(),
            symbol: None,
        }
    }

    /// Create a missing symbol error
    pub fn symbol_not_found<N: Into<String>, S: Into<String>>(namespace: N, symbol: S) -> Self {
        Self::SymbolNotFound {
            namespace: namespace.into(),
            symbol: Some(symbol.into()),
        }
    }

    /// Create an unsupported backend error
    pub fn unsupported_backend<S: Into<String>>(identifier: S) -> Self {
        Self::UnsupportedBackend {
            identifier: identifier.into(),
        }
    }
}

// Backend error creation methods
impl Error {
    /// Create a vector database error
    pub fn vector_db<S: Into<String>>(message: S) -> Self {
        Self::VectorDb {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error (simple)
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
