//! Error types for concept discovery.

use std::path::Path;

use codedict_loader::HierarchyError;
use codedict_types::ParseEnumError;
use thiserror::Error;

/// Errors that can occur while discovering concept codes.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The code hierarchy could not be loaded or queried.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// IO error while reading inputs or writing results.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON file could not be parsed.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// The JSON file.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A concept definition file is malformed.
    #[error("Invalid concept definition at line {line}: {reason}")]
    InvalidDefinition {
        /// Line number (1-based).
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// An option named an unknown dictionary or concept source.
    #[error(transparent)]
    UnknownOption(#[from] ParseEnumError),

    /// A required input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: String,
    },

    /// The output directory exists and overwriting was not requested.
    #[error("Output directory {path} already exists and overwriting is not enabled")]
    OutputExists {
        /// The existing directory.
        path: String,
    },

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DiscoveryError {
    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound {
            path: path.display().to_string(),
        }
    }
}

/// Result type for concept discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
