//! Error types for dataset generation.

use std::path::PathBuf;

use hrtfsynth_spec::{CatalogError, CodedError, ConfigError};
use thiserror::Error;

/// Result type for generation operations.
pub type BackendResult<T> = Result<T, GenerateError>;

/// Errors that can occur while generating a dataset.
///
/// Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Invalid grid or synthesis parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A buffer cannot be quantized (empty, silent, or non-finite).
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },

    /// Filesystem failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog does not match the planned grid.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The manifest could not be serialized.
    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl GenerateError {
    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }

    /// Creates an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl CodedError for GenerateError {
    fn code(&self) -> &'static str {
        match self {
            GenerateError::Config(e) => e.code(),
            GenerateError::Synthesis { .. } => "GEN_001",
            GenerateError::Io { .. } => "GEN_002",
            GenerateError::Catalog(e) => e.code(),
            GenerateError::Manifest(_) => "GEN_003",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            GenerateError::Config(_) => "config",
            GenerateError::Synthesis { .. } => "synthesis",
            GenerateError::Io { .. } => "io",
            GenerateError::Catalog(_) => "catalog",
            GenerateError::Manifest(_) => "io",
        }
    }
}
