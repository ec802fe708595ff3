//! JSON configuration for a discovery run.

use std::path::{Path, PathBuf};

use codedict_loader::parser::parse;
use codedict_loader::{HierarchySource, LoadConfig};
use codedict_types::HierarchyKind;
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, DiscoveryResult};

/// Location of the configuration file when none is given, relative to the base directory.
pub const DEFAULT_CONFIG_FILE: &str = "ConfigFiles/ConceptDiscoveryConfig.json";

/// Location of the code description file when the configuration names none.
pub const DEFAULT_CODE_DESCRIPTION_FILE: &str = "Data/Coding.tsv";

/// Location of the hierarchy edge file for externally supplied hierarchies.
pub const DEFAULT_HIERARCHY_FILE: &str = "Data/Hierarchy.tsv";

/// Where the code dictionary lives and how its files are laid out.
///
/// Relative paths are resolved against a base directory.
///
/// # Example
///
/// ```
/// use concept_discovery::DiscoveryConfig;
///
/// let config: DiscoveryConfig =
///     serde_json::from_str(r#"{"CodeDescriptionFile": "Data/Read.tsv", "Delimiter": ","}"#).unwrap();
/// assert_eq!(config.delimiter.as_deref(), Some(","));
/// assert!(config.hierarchy_file.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiscoveryConfig {
    /// File mapping codes to descriptions.
    #[serde(default)]
    pub code_description_file: Option<PathBuf>,
    /// Edge file, only used for externally supplied hierarchies.
    #[serde(default)]
    pub hierarchy_file: Option<PathBuf>,
    /// Field delimiter shared by both files (`\t` when absent).
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Whether the edge file starts with a header row (true when absent).
    #[serde(default)]
    pub hierarchy_has_headers: Option<bool>,
}

impl DiscoveryConfig {
    /// Reads a configuration file.
    pub fn from_path(path: &Path) -> DiscoveryResult<Self> {
        if !path.exists() {
            return Err(DiscoveryError::file_not_found(path));
        }
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| DiscoveryError::json(path, e))
    }

    /// Reads `path` if given, otherwise the default configuration file under
    /// `base_dir` when it exists, otherwise an empty configuration.
    pub fn load(path: Option<&Path>, base_dir: &Path) -> DiscoveryResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let default = base_dir.join(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_path(&default)
                } else {
                    tracing::debug!("No configuration at {}, using defaults", default.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Resolves the dictionary files and parser settings for `kind`.
    ///
    /// # Errors
    /// Fails if a dictionary file is missing or the delimiter is not usable.
    pub fn resolve(
        &self,
        kind: HierarchyKind,
        base_dir: &Path,
    ) -> DiscoveryResult<(HierarchySource, LoadConfig)> {
        let descriptions = resolve_path(
            self.code_description_file.as_deref(),
            DEFAULT_CODE_DESCRIPTION_FILE,
            base_dir,
        );
        require_file(&descriptions)?;

        let mut source = HierarchySource::descriptions(descriptions);
        if kind == HierarchyKind::ExternallySupplied {
            let edges = resolve_path(
                self.hierarchy_file.as_deref(),
                DEFAULT_HIERARCHY_FILE,
                base_dir,
            );
            require_file(&edges)?;
            source = source.with_edges(edges);
        }

        let mut config = LoadConfig::default();
        if let Some(delimiter) = &self.delimiter {
            let delimiter = parse::delimiter(delimiter)
                .map_err(|e| DiscoveryError::Config(e.to_string()))?;
            config = config.with_delimiter(delimiter);
        }
        if let Some(has_headers) = self.hierarchy_has_headers {
            config.edges.has_headers = has_headers;
        }

        Ok((source, config))
    }
}

fn resolve_path(configured: Option<&Path>, default: &str, base_dir: &Path) -> PathBuf {
    match configured {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => base_dir.join(path),
        None => base_dir.join(default),
    }
}

fn require_file(path: &Path) -> DiscoveryResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DiscoveryError::file_not_found(path))
    }
}
