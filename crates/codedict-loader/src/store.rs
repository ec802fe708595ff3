//! In-memory code hierarchy.
//!
//! Holds the DAG of codes and the word index built from their descriptions.
//! A hierarchy is built once (see [`crate::loader`] and [`crate::HierarchyBuilder`])
//! and is read-only afterwards, so it can be shared freely between threads.
//!
//! ```
//! use codedict_loader::{CodeHierarchy, LoadConfig};
//! use codedict_types::HierarchyKind;
//!
//! let source = "C\tEndocrine\nC1\tOther endocrine\nC10\tDiabetes mellitus\n";
//! let hierarchy =
//!     CodeHierarchy::prefix_coded_from_reader(source.as_bytes(), &LoadConfig::default()).unwrap();
//!
//! assert_eq!(hierarchy.kind(), HierarchyKind::PrefixCoded);
//! assert_eq!(hierarchy.node_or_empty("C10").level, 3);
//! assert!(hierarchy.get_node("XYZ").is_none());
//! ```

use std::collections::HashMap;

use codedict_types::{CodeNode, HierarchyKind};

use crate::types::LoadStats;
use crate::word_index::WordIndex;

/// Shared answer for lookups of codes that are not in the hierarchy.
static EMPTY_NODE: CodeNode = CodeNode::empty();

/// A clinical code hierarchy with its word index.
pub struct CodeHierarchy {
    kind: HierarchyKind,
    /// Nodes indexed by code.
    nodes: HashMap<String, CodeNode>,
    /// Lower-cased description token to codes.
    word_index: WordIndex,
    /// Statistics of the load that produced this hierarchy.
    stats: LoadStats,
}

impl std::fmt::Debug for CodeHierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeHierarchy")
            .field("kind", &self.kind)
            .field("nodes", &self.nodes.len())
            .field("word_index", &self.word_index.len())
            .finish()
    }
}

impl CodeHierarchy {
    pub(crate) fn from_parts(
        kind: HierarchyKind,
        nodes: HashMap<String, CodeNode>,
        word_index: WordIndex,
    ) -> Self {
        let stats = LoadStats {
            code_count: nodes.len(),
            placeholder_codes: nodes.values().filter(|n| n.description.is_empty()).count(),
            word_count: word_index.len(),
            ..LoadStats::default()
        };
        Self {
            kind,
            nodes,
            word_index,
            stats,
        }
    }

    pub(crate) fn stats_mut(&mut self) -> &mut LoadStats {
        &mut self.stats
    }

    /// The kind of hierarchy.
    pub fn kind(&self) -> HierarchyKind {
        self.kind
    }

    /// Statistics recorded while the hierarchy was loaded.
    pub fn load_stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Gets a node by code.
    pub fn get_node(&self, code: &str) -> Option<&CodeNode> {
        self.nodes.get(code)
    }

    /// Gets a node by code, or the empty node (no edges, level 0) if the code is unknown.
    ///
    /// Never modifies the hierarchy.
    pub fn node_or_empty(&self, code: &str) -> &CodeNode {
        self.nodes.get(code).unwrap_or(&EMPTY_NODE)
    }

    /// Checks if a code is in the hierarchy.
    pub fn contains(&self, code: &str) -> bool {
        self.nodes.contains_key(code)
    }

    /// Level of a code, or 0 if it is unknown.
    pub fn level(&self, code: &str) -> u32 {
        self.node_or_empty(code).level
    }

    /// Returns the word index.
    pub fn word_index(&self) -> &WordIndex {
        &self.word_index
    }

    /// Returns the total number of codes.
    pub fn code_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.parents.len()).sum()
    }

    /// Iterates over all codes.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &CodeNode> {
        self.nodes.values()
    }

    /// Returns the root codes (codes without parents).
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|n| n.is_root())
            .map(|n| n.code.as_str())
            .collect()
    }

    /// Depth of the deepest code.
    pub fn max_level(&self) -> u32 {
        self.nodes.values().map(|n| n.level).max().unwrap_or(0)
    }
}
