//! # concept-discovery
//!
//! Finds the clinical codes that define a medical concept.
//!
//! Concepts are described by positive and negative terms in a definition
//! file. Each term is matched against the descriptions of a code dictionary
//! loaded with [`codedict_loader`]; positive codes can then be generalised up
//! the hierarchy. Results are written as tab separated text files.
//!
//! ## Usage
//!
//! ```no_run
//! use concept_discovery::{run, DiscoveryOptions, GeneraliseParams};
//!
//! let mut options = DiscoveryOptions::new("Concepts.txt");
//! options.generalise = Some(GeneraliseParams::new(1, 0.2));
//!
//! let summary = run(&options)?;
//! println!("Results in {}", summary.output_dir.display());
//! # Ok::<(), concept_discovery::DiscoveryError>(())
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod definitions;
pub mod error;
pub mod identify;
pub mod pipeline;
pub mod writer;

pub use config::DiscoveryConfig;
pub use definitions::{ConceptDefinitions, ConceptSource};
pub use error::{DiscoveryError, DiscoveryResult};
pub use identify::{
    codes_for_terms, identify_and_generalise, identify_codes, ConceptResult, GeneraliseParams,
};
pub use pipeline::{run, DiscoveryOptions, DiscoverySummary};
