//! A complete discovery run: load, identify, write.

use std::path::PathBuf;

use chrono::Local;
use codedict_loader::load_hierarchy;
use codedict_types::HierarchyKind;

use crate::config::DiscoveryConfig;
use crate::definitions::{ConceptDefinitions, ConceptSource};
use crate::error::DiscoveryResult;
use crate::identify::{identify_and_generalise, identify_codes, ConceptResult, GeneraliseParams};
use crate::writer::{default_output_dir, prepare_output_dir, write_results};

/// Inputs of a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Concept definition file.
    pub input: PathBuf,
    /// Configuration file; the default location under `base_dir` is tried when absent.
    pub config: Option<PathBuf>,
    /// Kind of code dictionary to load.
    pub dictionary: HierarchyKind,
    /// Format of the concept definition file.
    pub concept_source: ConceptSource,
    /// Generalisation settings, or `None` to skip generalisation.
    pub generalise: Option<GeneraliseParams>,
    /// Output directory; a timestamped directory under `base_dir` when absent.
    pub output: Option<PathBuf>,
    /// Write into an existing output directory.
    pub overwrite: bool,
    /// Directory that default and relative paths are resolved against.
    pub base_dir: PathBuf,
}

impl DiscoveryOptions {
    /// Options for a Read v2 flat file run without generalisation.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            config: None,
            dictionary: HierarchyKind::default(),
            concept_source: ConceptSource::default(),
            generalise: None,
            output: None,
            overwrite: false,
            base_dir: PathBuf::from("."),
        }
    }
}

/// What a discovery run produced.
#[derive(Debug, Clone)]
pub struct DiscoverySummary {
    /// Directory holding the result files.
    pub output_dir: PathBuf,
    /// The result files written.
    pub files: Vec<PathBuf>,
    /// Codes found per concept.
    pub results: Vec<ConceptResult>,
}

/// Runs concept discovery.
///
/// Inputs are checked before the output directory is created.
pub fn run(options: &DiscoveryOptions) -> DiscoveryResult<DiscoverySummary> {
    let config = DiscoveryConfig::load(options.config.as_deref(), &options.base_dir)?;
    let (source, load_config) = config.resolve(options.dictionary, &options.base_dir)?;
    let definitions = ConceptDefinitions::from_path(&options.input, options.concept_source)?;

    let output_dir = match &options.output {
        Some(dir) => dir.clone(),
        None => default_output_dir(&options.base_dir, Local::now()),
    };
    prepare_output_dir(&output_dir, options.overwrite)?;

    tracing::info!("Creating the code dictionary");
    let hierarchy = load_hierarchy(options.dictionary, &source, &load_config)?;

    let results = match options.generalise {
        Some(params) => {
            tracing::info!("Running generalised code identification");
            identify_and_generalise(&hierarchy, &definitions, params)?
        }
        None => {
            tracing::info!("Running code identification without generalisation");
            identify_codes(&hierarchy, &definitions)?
        }
    };

    let files = write_results(&output_dir, &hierarchy, &results)?;
    Ok(DiscoverySummary {
        output_dir,
        files,
        results,
    })
}
