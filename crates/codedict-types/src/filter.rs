//! Relationship label filter for traversals.

/// Restricts a traversal to edges with particular relationship labels.
///
/// An empty filter lets every edge through. A non-empty filter only lets
/// through edges whose label is one of its entries; the unlabeled edge can be
/// admitted explicitly with [`with_unlabeled`](Self::with_unlabeled).
///
/// # Examples
///
/// ```
/// use codedict_types::RelationshipFilter;
///
/// let any = RelationshipFilter::any();
/// assert!(any.allows(Some("part_of")));
/// assert!(any.allows(None));
///
/// let is_a = RelationshipFilter::only(["is_a"]);
/// assert!(is_a.allows(Some("is_a")));
/// assert!(!is_a.allows(Some("part_of")));
/// assert!(!is_a.allows(None));
///
/// let is_a_or_plain = RelationshipFilter::only(["is_a"]).with_unlabeled();
/// assert!(is_a_or_plain.allows(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationshipFilter {
    labels: Vec<Option<String>>,
}

impl RelationshipFilter {
    /// A filter that admits every edge.
    pub fn any() -> Self {
        Self::default()
    }

    /// A filter that admits only edges carrying one of the given labels.
    pub fn only<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for label in labels {
            filter.push(Some(label.into()));
        }
        filter
    }

    /// Also admits edges without a label.
    pub fn with_unlabeled(mut self) -> Self {
        self.push(None);
        self
    }

    fn push(&mut self, label: Option<String>) {
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Returns true if the filter admits every edge.
    pub fn is_unrestricted(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if an edge with the given label may be traversed.
    pub fn allows(&self, label: Option<&str>) -> bool {
        self.labels.is_empty() || self.labels.iter().any(|l| l.as_deref() == label)
    }
}
