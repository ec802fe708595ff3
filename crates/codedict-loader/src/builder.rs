//! Construction of a [`CodeHierarchy`] from source records.
//!
//! The builder owns the graph while it is being assembled. Every edge is
//! recorded on both of its endpoints, so the finished hierarchy always has
//! matching `parents` and `children` lists.

use std::collections::{HashMap, VecDeque};

use codedict_types::{CodeDescription, CodeNode, Edge, HierarchyEdge, HierarchyKind};

use crate::store::CodeHierarchy;
use crate::types::{HierarchyError, HierarchyResult};
use crate::word_index::WordIndex;

/// Incrementally assembles a code hierarchy.
///
/// # Example
///
/// ```
/// use codedict_loader::HierarchyBuilder;
/// use codedict_types::{CodeDescription, HierarchyKind};
///
/// let mut builder = HierarchyBuilder::new(HierarchyKind::PrefixCoded);
/// builder.add_description(CodeDescription {
///     code: "C10".to_string(),
///     description: "Diabetes mellitus".to_string(),
/// });
/// let hierarchy = builder.build().unwrap();
///
/// // The missing prefix parents are created on the way.
/// assert_eq!(hierarchy.code_count(), 3);
/// assert_eq!(hierarchy.node_or_empty("C1").level, 2);
/// ```
#[derive(Debug)]
pub struct HierarchyBuilder {
    kind: HierarchyKind,
    nodes: HashMap<String, CodeNode>,
    word_index: WordIndex,
}

impl HierarchyBuilder {
    /// Creates an empty builder for the given kind of hierarchy.
    pub fn new(kind: HierarchyKind) -> Self {
        Self {
            kind,
            nodes: HashMap::new(),
            word_index: WordIndex::new(),
        }
    }

    /// Returns the kind of hierarchy being built.
    pub fn kind(&self) -> HierarchyKind {
        self.kind
    }

    /// Number of codes added so far, including placeholders.
    pub fn code_count(&self) -> usize {
        self.nodes.len()
    }

    /// Adds a code and its description, indexing the description's words.
    ///
    /// For prefix-coded hierarchies the code is also linked to its prefix parent,
    /// creating any missing ancestors.
    pub fn add_description(&mut self, record: CodeDescription) {
        let CodeDescription { code, description } = record;
        self.word_index.insert(&code, &description);

        let level = self.initial_level(&code);
        self.nodes
            .entry(code.clone())
            .or_insert_with(|| CodeNode::new(code.as_str(), level, ""))
            .set_description(description);

        if self.kind == HierarchyKind::PrefixCoded {
            self.link_prefix_chain(&code);
        }
    }

    /// Adds a labeled or unlabeled edge from an edge source record.
    pub fn add_hierarchy_edge(&mut self, record: HierarchyEdge) -> bool {
        let HierarchyEdge {
            child,
            parent,
            label,
        } = record;
        self.add_edge(&child, &parent, label)
    }

    /// Links `child` to `parent`, creating either node if it does not exist yet.
    ///
    /// Returns false if the edge was already present.
    pub fn add_edge(&mut self, child: &str, parent: &str, label: Option<String>) -> bool {
        self.ensure_node(child);
        self.ensure_node(parent);

        let up = Edge {
            code: parent.to_string(),
            label: label.clone(),
        };
        if let Some(node) = self.nodes.get_mut(child) {
            if node.parents.contains(&up) {
                return false;
            }
            node.parents.push(up);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(Edge {
                code: child.to_string(),
                label,
            });
        }
        true
    }

    /// Finishes construction.
    ///
    /// Externally supplied hierarchies get their levels assigned here.
    ///
    /// # Errors
    /// Returns [`HierarchyError::CyclicHierarchy`] if the edges form a cycle.
    pub fn build(mut self) -> HierarchyResult<CodeHierarchy> {
        if self.kind == HierarchyKind::ExternallySupplied {
            assign_levels(&mut self.nodes)?;
        }
        Ok(CodeHierarchy::from_parts(
            self.kind,
            self.nodes,
            self.word_index,
        ))
    }

    fn initial_level(&self, code: &str) -> u32 {
        match self.kind {
            HierarchyKind::PrefixCoded => prefix_level(code),
            // Assigned once all edges are known.
            HierarchyKind::ExternallySupplied => 0,
        }
    }

    fn ensure_node(&mut self, code: &str) -> bool {
        if self.nodes.contains_key(code) {
            return false;
        }
        let level = self.initial_level(code);
        self.nodes
            .insert(code.to_string(), CodeNode::new(code, level, ""));
        true
    }

    fn link_prefix_chain(&mut self, code: &str) {
        let mut child = code.to_string();
        while let Some(parent) = prefix_parent(&child) {
            let has_parent = self
                .nodes
                .get(&child)
                .is_some_and(|node| !node.parents.is_empty());
            if has_parent {
                break;
            }
            let created = self.ensure_node(parent);
            self.add_edge(&child, parent, None);
            if !created {
                // The parent was already linked to its own ancestors.
                break;
            }
            child = parent.to_string();
        }
    }
}

/// The code with its final character removed, or `None` for single-character codes.
pub fn prefix_parent(code: &str) -> Option<&str> {
    let (last, _) = code.char_indices().next_back()?;
    (last > 0).then(|| &code[..last])
}

/// Level of a prefix-coded code: its length in characters.
pub fn prefix_level(code: &str) -> u32 {
    u32::try_from(code.chars().count()).unwrap_or(u32::MAX)
}

/// Assigns levels with a topological pass: roots are level 1, every other code
/// sits one below its deepest parent.
fn assign_levels(nodes: &mut HashMap<String, CodeNode>) -> HierarchyResult<()> {
    let mut pending: HashMap<&str, usize> = nodes
        .iter()
        .map(|(code, node)| (code.as_str(), node.parents.len()))
        .collect();
    let mut levels: HashMap<&str, u32> = HashMap::with_capacity(nodes.len());
    let mut queue: VecDeque<&str> = VecDeque::new();

    for (&code, &remaining) in &pending {
        if remaining == 0 {
            levels.insert(code, 1);
            queue.push_back(code);
        }
    }

    while let Some(code) = queue.pop_front() {
        let level = levels.get(code).copied().unwrap_or(1);
        let Some(node) = nodes.get(code) else {
            continue;
        };
        for child in node.child_codes() {
            let child_level = levels.entry(child).or_insert(0);
            *child_level = (*child_level).max(level + 1);
            if let Some(remaining) = pending.get_mut(child) {
                *remaining -= 1;
                if *remaining == 0 {
                    queue.push_back(child);
                }
            }
        }
    }

    if let Some(code) = pending
        .iter()
        .filter(|(_, remaining)| **remaining > 0)
        .map(|(code, _)| *code)
        .min()
    {
        return Err(HierarchyError::CyclicHierarchy {
            code: code.to_string(),
        });
    }

    let levels: Vec<(String, u32)> = levels
        .into_iter()
        .map(|(code, level)| (code.to_string(), level))
        .collect();
    for (code, level) in levels {
        if let Some(node) = nodes.get_mut(&code) {
            node.level = level;
        }
    }
    Ok(())
}
