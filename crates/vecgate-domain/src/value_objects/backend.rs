//! Backend identifiers and the selection result
//!
//! [`BackendKind`] is the closed set of identifiers configuration may name.
//! [`Backend`] is what a selection produces: either a live provider or the
//! explicit disabled sentinel.

use crate::error::{Error, Result};
use crate::ports::providers::VectorStoreProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Supported vector store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process, non-persistent store
    Memory,
    /// JSON files on local disk
    Filesystem,
    /// Qdrant over its REST API
    Qdrant,
    /// No backend; every access fails with [`Error::BackendDisabled`]
    Disabled,
}

impl BackendKind {
    /// Every identifier, `Disabled` included
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Memory,
        BackendKind::Filesystem,
        BackendKind::Qdrant,
        BackendKind::Disabled,
    ];

    /// Configuration string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Filesystem => "filesystem",
            Self::Qdrant => "qdrant",
            Self::Disabled => "disabled",
        }
    }

    /// Parse a configuration value
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything else fails with [`Error::UnsupportedBackend`] carrying the
    /// identifier exactly as given.
    pub fn parse(identifier: &str) -> Result<Self> {
        let normalized = identifier.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::unsupported_backend(identifier))
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Outcome of selecting a backend
///
/// `Disabled` is a distinct tagged value rather than a missing provider, so a
/// cached selection can tell "turned off" apart from "not resolved yet".
#[derive(Clone)]
pub enum Backend {
    /// A constructed provider
    Enabled {
        /// Which backend was constructed
        kind: BackendKind,
        /// The provider instance
        provider: Arc<dyn VectorStoreProvider>,
    },
    /// Configuration turned the vector database off
    Disabled,
}

impl Backend {
    /// Wrap a constructed provider
    pub fn enabled(kind: BackendKind, provider: Arc<dyn VectorStoreProvider>) -> Self {
        Self::Enabled { kind, provider }
    }

    /// The backend kind this selection stands for
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Enabled { kind, .. } => *kind,
            Self::Disabled => BackendKind::Disabled,
        }
    }

    /// Whether this is the disabled sentinel
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Borrow the provider, failing with [`Error::BackendDisabled`] on the sentinel
    pub fn provider(&self) -> Result<&Arc<dyn VectorStoreProvider>> {
        match self {
            Self::Enabled { provider, .. } => Ok(provider),
            Self::Disabled => Err(Error::BackendDisabled),
        }
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled { kind, .. } => f.debug_struct("Enabled").field("kind", kind).finish(),
            Self::Disabled => f.write_str("Disabled"),
        }
    }
}
