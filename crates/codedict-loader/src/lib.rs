//! # codedict-loader
//!
//! In-memory clinical code hierarchies (Read v2, SNOMED CT and similar).
//!
//! The crate loads a delimited `code<TAB>description` file, plus an edge file
//! for externally supplied hierarchies, into a [`CodeHierarchy`]: a DAG of
//! [`CodeNode`](codedict_types::CodeNode)s with a word index over their
//! descriptions. A loaded hierarchy is immutable and answers:
//!
//! - level-aware ancestor and descendant traversal with relationship filtering
//! - level reachability
//! - bag-of-words and phrase search over descriptions
//! - support-threshold generalisation
//!
//! ## Features
//!
//! - `parallel` (default): Scans descriptions for phrase search with rayon.
//!
//! ## Usage
//!
//! ```no_run
//! use codedict_loader::{CodeHierarchy, HierarchySource, LoadConfig};
//! use codedict_types::{HierarchyKind, RelationshipFilter};
//!
//! let hierarchy = CodeHierarchy::from_source(
//!     HierarchyKind::PrefixCoded,
//!     &HierarchySource::descriptions("Data/Coding.tsv"),
//!     &LoadConfig::default(),
//! )?;
//!
//! let diabetes = hierarchy.codes_from_words([["diabetes", "mellitus"]]);
//! let general = hierarchy.generalise(&diabetes[0], 1, 0.2);
//! let level_three = hierarchy.codes_at_level(&general, 3, &RelationshipFilter::any());
//! # Ok::<(), codedict_loader::HierarchyError>(())
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod description;
mod generalise;
pub mod loader;
pub mod parser;
pub mod relationship;
mod search;
pub mod store;
pub mod traits;
mod traverser;
pub mod types;
pub mod word_index;

#[cfg(test)]
mod fixtures;

// Re-export main types at crate root
pub use builder::HierarchyBuilder;
pub use loader::{constructor_for, load_hierarchy, Constructor};
pub use parser::{SourceParser, SourceRecord};
pub use search::phrase_pattern;
pub use store::CodeHierarchy;
pub use traits::HierarchyQuery;
pub use types::{
    HierarchyError, HierarchyResult, HierarchySource, LoadConfig, LoadStats, SourceConfig,
};
pub use word_index::{tokenize, WordIndex};

// Re-export codedict-types for convenience
pub use codedict_types;
