//! Text search over code descriptions.
//!
//! Word search uses the inverted index built at load time; phrase search
//! scans every description with case-insensitive regular expressions.

use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};

use codedict_types::CodeNode;

use crate::store::CodeHierarchy;
use crate::types::{HierarchyError, HierarchyResult};

/// Compiles a phrase so it only matches whole words of a description.
///
/// The phrase itself is a regular expression fragment.
pub fn phrase_pattern(phrase: &str) -> HierarchyResult<Regex> {
    RegexBuilder::new(&format!(r"(?:^|\s)(?:{phrase})(?:\s|$)"))
        .case_insensitive(true)
        .build()
        .map_err(|e| HierarchyError::invalid_argument(format!("invalid phrase '{phrase}': {e}")))
}

impl CodeHierarchy {
    /// For each bag of words, the codes whose description contains every word.
    ///
    /// Words are matched case-insensitively against whole description tokens.
    /// An empty bag yields an empty set.
    pub fn codes_from_words<B, W, S>(&self, bags: B) -> Vec<HashSet<String>>
    where
        B: IntoIterator<Item = W>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        bags.into_iter()
            .map(|bag| self.word_index().codes_for_all(bag))
            .collect()
    }

    /// For each bag of phrases, the codes whose description matches every phrase.
    ///
    /// A phrase must be bounded by whitespace or the ends of the description and
    /// is matched case-insensitively. An empty bag yields an empty set.
    ///
    /// # Errors
    /// Returns [`HierarchyError::InvalidArgument`] if a phrase is not a valid
    /// regular expression. No search is run in that case.
    pub fn codes_from_phrases<B, P, S>(&self, bags: B) -> HierarchyResult<Vec<HashSet<String>>>
    where
        B: IntoIterator<Item = P>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = bags
            .into_iter()
            .map(|bag| {
                bag.into_iter()
                    .map(|phrase| phrase_pattern(phrase.as_ref()))
                    .collect::<HierarchyResult<Vec<_>>>()
            })
            .collect::<HierarchyResult<Vec<_>>>()?;

        let nodes: Vec<&CodeNode> = self.nodes().collect();
        Ok(compiled
            .iter()
            .map(|patterns| scan(&nodes, patterns))
            .collect())
    }

    /// Description of a code, if it is in the hierarchy.
    pub fn description(&self, code: &str) -> Option<&str> {
        self.get_node(code).map(|node| node.description.as_str())
    }

    /// Descriptions of `codes` in input order. Unknown codes are left out.
    pub fn descriptions<I, S>(&self, codes: I) -> Vec<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .filter_map(|code| self.description(code.as_ref()))
            .collect()
    }

    /// Descriptions of every code, ordered by code.
    pub fn all_descriptions(&self) -> Vec<&str> {
        let mut nodes: Vec<&CodeNode> = self.nodes().collect();
        nodes.sort_by(|a, b| a.code.cmp(&b.code));
        nodes.into_iter().map(|n| n.description.as_str()).collect()
    }
}

fn matches_all(node: &CodeNode, patterns: &[Regex]) -> bool {
    patterns.iter().all(|re| re.is_match(&node.description))
}

#[cfg(feature = "parallel")]
fn scan(nodes: &[&CodeNode], patterns: &[Regex]) -> HashSet<String> {
    if patterns.is_empty() {
        return HashSet::new();
    }
    nodes
        .par_iter()
        .filter(|node| matches_all(node, patterns))
        .map(|node| node.code.clone())
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn scan(nodes: &[&CodeNode], patterns: &[Regex]) -> HashSet<String> {
    if patterns.is_empty() {
        return HashSet::new();
    }
    nodes
        .iter()
        .filter(|node| matches_all(node, patterns))
        .map(|node| node.code.clone())
        .collect()
}
