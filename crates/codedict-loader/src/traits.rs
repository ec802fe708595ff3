//! Query contract for code hierarchies.
//!
//! Concept identification only talks to a hierarchy through
//! [`HierarchyQuery`], so a backend that mirrors the hierarchy elsewhere can
//! stand in for the in-memory [`CodeHierarchy`].

use std::collections::HashSet;

use codedict_types::{Direction, RelationshipFilter};

use crate::store::CodeHierarchy;
use crate::types::HierarchyResult;

/// Read-only queries over a clinical code hierarchy.
///
/// Unknown codes are ignored by every method.
pub trait HierarchyQuery: Send + Sync {
    /// Checks if a code exists.
    fn has_code(&self, code: &str) -> bool;

    /// Description of a code.
    fn description(&self, code: &str) -> Option<String>;

    /// Descriptions of `codes` in input order, skipping unknown codes.
    fn descriptions(&self, codes: &[&str]) -> Vec<String> {
        codes.iter().filter_map(|code| self.description(code)).collect()
    }

    /// Level-by-level relatives; see [`CodeHierarchy::relatives`].
    fn relatives(
        &self,
        codes: &[&str],
        direction: Direction,
        filter: &RelationshipFilter,
        levels_to_ignore: i64,
        levels_to_extract: i64,
    ) -> HierarchyResult<HashSet<String>>;

    /// Every ancestor of `codes`.
    fn all_ancestors(&self, codes: &[&str]) -> HashSet<String>;

    /// Every descendant of `codes`.
    fn all_descendants(&self, codes: &[&str]) -> HashSet<String>;

    /// Codes at `level` reachable from `codes`, or all codes at `level` when `codes` is empty.
    fn codes_at_level(
        &self,
        codes: &[&str],
        level: u32,
        filter: &RelationshipFilter,
    ) -> HashSet<String>;

    /// Per bag, the codes whose description contains every word.
    fn codes_from_words(&self, bags: &[Vec<&str>]) -> Vec<HashSet<String>>;

    /// Per bag, the codes whose description matches every phrase.
    fn codes_from_phrases(&self, bags: &[Vec<&str>]) -> HierarchyResult<Vec<HashSet<String>>>;

    /// Generalised codes; see [`CodeHierarchy::generalise`].
    fn generalise(&self, initial: &[&str], search_level: i64, child_threshold: f64)
        -> HashSet<String>;
}

impl HierarchyQuery for CodeHierarchy {
    fn has_code(&self, code: &str) -> bool {
        self.contains(code)
    }

    fn description(&self, code: &str) -> Option<String> {
        CodeHierarchy::description(self, code).map(str::to_string)
    }

    fn relatives(
        &self,
        codes: &[&str],
        direction: Direction,
        filter: &RelationshipFilter,
        levels_to_ignore: i64,
        levels_to_extract: i64,
    ) -> HierarchyResult<HashSet<String>> {
        CodeHierarchy::relatives(
            self,
            codes,
            direction,
            filter,
            levels_to_ignore,
            levels_to_extract,
        )
    }

    fn all_ancestors(&self, codes: &[&str]) -> HashSet<String> {
        CodeHierarchy::all_ancestors(self, codes)
    }

    fn all_descendants(&self, codes: &[&str]) -> HashSet<String> {
        CodeHierarchy::all_descendants(self, codes)
    }

    fn codes_at_level(
        &self,
        codes: &[&str],
        level: u32,
        filter: &RelationshipFilter,
    ) -> HashSet<String> {
        CodeHierarchy::codes_at_level(self, codes, level, filter)
    }

    fn codes_from_words(&self, bags: &[Vec<&str>]) -> Vec<HashSet<String>> {
        CodeHierarchy::codes_from_words(self, bags)
    }

    fn codes_from_phrases(&self, bags: &[Vec<&str>]) -> HierarchyResult<Vec<HashSet<String>>> {
        CodeHierarchy::codes_from_phrases(self, bags)
    }

    fn generalise(
        &self,
        initial: &[&str],
        search_level: i64,
        child_threshold: f64,
    ) -> HashSet<String> {
        CodeHierarchy::generalise(self, initial, search_level, child_threshold)
    }
}
