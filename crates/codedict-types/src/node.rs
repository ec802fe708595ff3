//! Hierarchy node type.
//!
//! This module provides the `CodeNode` struct representing a single code in a
//! clinical code hierarchy, together with the labelled `Edge` that links it to
//! its parents and children.

/// A directed edge between two codes in the hierarchy.
///
/// The same edge is recorded twice: once in the child's `parents` list (pointing
/// at the parent) and once in the parent's `children` list (pointing at the child).
///
/// # Examples
///
/// ```
/// use codedict_types::Edge;
///
/// let edge = Edge::labeled("C10", "is_a");
/// assert_eq!(edge.code, "C10");
/// assert_eq!(edge.label(), Some("is_a"));
///
/// let plain = Edge::unlabeled("C1");
/// assert_eq!(plain.label(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// The code at the other end of the edge.
    pub code: String,
    /// Relationship label (e.g. `is_a`, `part_of`). `None` is the unlabeled edge.
    pub label: Option<String>,
}

impl Edge {
    /// Creates an edge without a relationship label.
    pub fn unlabeled(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: None,
        }
    }

    /// Creates an edge with a relationship label.
    pub fn labeled(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: Some(label.into()),
        }
    }

    /// Returns the relationship label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A single code in a clinical code hierarchy.
///
/// # Examples
///
/// ```
/// use codedict_types::CodeNode;
///
/// let node = CodeNode::new("C10", 3, "Diabetes Mellitus");
/// assert_eq!(node.level, 3);
/// assert_eq!(node.normalized_description, "diabetes mellitus");
/// assert!(node.is_root());
/// assert!(node.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeNode {
    /// Unique identifier of the code within its hierarchy.
    pub code: String,
    /// Depth from the root(s). Roots have the smallest level; 0 only for the empty node.
    pub level: u32,
    /// Edges to the parent codes, in insertion order.
    pub parents: Vec<Edge>,
    /// Edges to the child codes, in insertion order.
    pub children: Vec<Edge>,
    /// Description with case preserved.
    pub description: String,
    /// Lower-cased description used for case-insensitive matching.
    pub normalized_description: String,
}

impl CodeNode {
    /// Returns a node with no code, no edges and level 0.
    ///
    /// Used as the answer for lookups of codes that are not in a hierarchy.
    pub const fn empty() -> Self {
        Self {
            code: String::new(),
            level: 0,
            parents: Vec::new(),
            children: Vec::new(),
            description: String::new(),
            normalized_description: String::new(),
        }
    }

    /// Creates a node without any edges.
    pub fn new(code: impl Into<String>, level: u32, description: impl Into<String>) -> Self {
        let mut node = Self {
            code: code.into(),
            level,
            ..Self::empty()
        };
        node.set_description(description);
        node
    }

    /// Replaces the description, keeping the normalized form in step.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.normalized_description = self.description.to_lowercase();
    }

    /// Returns true if the code has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns true if the code has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates over the parent codes.
    pub fn parent_codes(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(|e| e.code.as_str())
    }

    /// Iterates over the child codes.
    pub fn child_codes(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|e| e.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_node() {
        let node = CodeNode::empty();
        assert!(node.code.is_empty());
        assert_eq!(node.level, 0);
        assert!(node.is_root());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_set_description_updates_normalized() {
        let mut node = CodeNode::new("C1", 2, "Old");
        node.set_description("[V]Family HISTORY");
        assert_eq!(node.description, "[V]Family HISTORY");
        assert_eq!(node.normalized_description, "[v]family history");
    }

    #[test]
    fn test_edge_codes() {
        let mut node = CodeNode::new("C1", 2, "Endocrine");
        node.parents.push(Edge::unlabeled("C"));
        node.children.push(Edge::labeled("C10", "is_a"));
        node.children.push(Edge::unlabeled("C11"));

        assert_eq!(node.parent_codes().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(node.child_codes().collect::<Vec<_>>(), vec!["C10", "C11"]);
        assert!(!node.is_root());
        assert!(!node.is_leaf());
    }
}
