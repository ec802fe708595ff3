//! Source record types.
//!
//! One record per line of a code dictionary source file.

/// A `code<TAB>description` line from a code description file.
///
/// # Examples
///
/// ```
/// use codedict_types::CodeDescription;
///
/// let record = CodeDescription {
///     code: "C10".to_string(),
///     description: "Diabetes mellitus".to_string(),
/// };
/// assert_eq!(record.code, "C10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeDescription {
    /// The code.
    pub code: String,
    /// The free-text description of the code.
    pub description: String,
}

/// A `child<TAB>parent[<TAB>label]` line from a hierarchy edge file.
///
/// # Examples
///
/// ```
/// use codedict_types::HierarchyEdge;
///
/// let edge = HierarchyEdge {
///     child: "46635009".to_string(),
///     parent: "73211009".to_string(),
///     label: Some("is_a".to_string()),
/// };
/// assert_eq!(edge.label(), Some("is_a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyEdge {
    /// The more specific code.
    pub child: String,
    /// The more general code.
    pub parent: String,
    /// Relationship label; `None` for an unlabeled edge.
    pub label: Option<String>,
}

impl HierarchyEdge {
    /// Returns the relationship label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
