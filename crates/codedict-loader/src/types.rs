//! Loader-specific types: errors, source configuration and load statistics.

use std::path::PathBuf;

use codedict_types::ParseEnumError;
use thiserror::Error;

/// Errors raised while building or querying a code hierarchy.
///
/// Unknown codes are never an error: lookups and traversals silently skip them.
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// I/O error reading a source file.
    #[error("IO error reading source file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// An argument was out of range or not recognised.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A source line could not be split into the expected fields.
    #[error("Malformed source at line {line}: {reason}")]
    MalformedSource {
        /// 1-based line number of the offending record.
        line: u64,
        /// What was wrong with the line.
        reason: String,
    },

    /// The edge source does not describe an acyclic graph.
    #[error("Malformed source: hierarchy contains a cycle through code {code}")]
    CyclicHierarchy {
        /// A code that lies on the cycle.
        code: String,
    },

    /// Source file not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },
}

impl HierarchyError {
    /// Builds an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns true for errors caused by the content of a source file.
    pub fn is_malformed_source(&self) -> bool {
        matches!(
            self,
            Self::MalformedSource { .. } | Self::CyclicHierarchy { .. }
        )
    }
}

impl From<ParseEnumError> for HierarchyError {
    fn from(err: ParseEnumError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Configuration for reading one delimited source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first line is a header row to skip.
    pub has_headers: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            has_headers: false,
        }
    }
}

/// Configuration for loading a hierarchy from its source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// How to read the code description file.
    pub descriptions: SourceConfig,
    /// How to read the hierarchy edge file (externally supplied hierarchies only).
    pub edges: SourceConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            descriptions: SourceConfig::default(),
            edges: SourceConfig {
                has_headers: true,
                ..SourceConfig::default()
            },
        }
    }
}

impl LoadConfig {
    /// Uses the same delimiter for every source file.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.descriptions.delimiter = delimiter;
        self.edges.delimiter = delimiter;
        self
    }
}

/// Locations of the files a hierarchy is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchySource {
    /// The `code<sep>description` file.
    pub descriptions: PathBuf,
    /// The `child<sep>parent[<sep>label]` file, required for externally supplied hierarchies.
    pub edges: Option<PathBuf>,
}

impl HierarchySource {
    /// A source consisting of only a description file.
    pub fn descriptions(path: impl Into<PathBuf>) -> Self {
        Self {
            descriptions: path.into(),
            edges: None,
        }
    }

    /// Adds an edge file to the source.
    pub fn with_edges(mut self, path: impl Into<PathBuf>) -> Self {
        self.edges = Some(path.into());
        self
    }
}

/// Statistics from building a hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Description records read.
    pub description_records: usize,
    /// Edge records read (externally supplied hierarchies only).
    pub edge_records: usize,
    /// Codes in the finished hierarchy.
    pub code_count: usize,
    /// Codes created only because another code referred to them.
    pub placeholder_codes: usize,
    /// Distinct tokens in the word index.
    pub word_count: usize,
    /// Time taken to build in milliseconds.
    pub load_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_config_default() {
        let config = SourceConfig::default();
        assert_eq!(config.delimiter, b'\t');
        assert!(!config.has_headers);
    }

    #[test]
    fn test_load_config_default_edges_have_headers() {
        let config = LoadConfig::default();
        assert!(!config.descriptions.has_headers);
        assert!(config.edges.has_headers);
    }

    #[test]
    fn test_load_config_with_delimiter() {
        let config = LoadConfig::default().with_delimiter(b',');
        assert_eq!(config.descriptions.delimiter, b',');
        assert_eq!(config.edges.delimiter, b',');
    }

    #[test]
    fn test_error_display() {
        let err = HierarchyError::MalformedSource {
            line: 12,
            reason: "missing description field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed source at line 12: missing description field"
        );
        assert!(err.is_malformed_source());

        let err = HierarchyError::invalid_argument("levels to ignore must be at least 0");
        assert_eq!(
            err.to_string(),
            "Invalid argument: levels to ignore must be at least 0"
        );
        assert!(!err.is_malformed_source());
    }

    #[test]
    fn test_parse_error_is_invalid_argument() {
        let err: HierarchyError = "sideways"
            .parse::<codedict_types::Direction>()
            .unwrap_err()
            .into();
        assert!(matches!(err, HierarchyError::InvalidArgument(_)));
    }

    #[test]
    fn test_hierarchy_source_builder() {
        let source = HierarchySource::descriptions("codes.tsv").with_edges("edges.tsv");
        assert_eq!(source.descriptions, PathBuf::from("codes.tsv"));
        assert_eq!(source.edges, Some(PathBuf::from("edges.tsv")));
    }
}
