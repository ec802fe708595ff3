//! Hierarchy traversal.
//!
//! Level-by-level walks up or down the hierarchy, closures over all
//! ancestors or descendants, and level reachability.

use std::collections::HashSet;

use codedict_types::{CodeNode, Direction, Edge, RelationshipFilter};

use crate::store::CodeHierarchy;
use crate::types::{HierarchyError, HierarchyResult};

fn edges(node: &CodeNode, direction: Direction) -> &[Edge] {
    match direction {
        Direction::Ancestors => &node.parents,
        Direction::Descendants => &node.children,
    }
}

impl CodeHierarchy {
    /// Collects the relatives of `codes` in one direction.
    ///
    /// The walk proceeds one level at a time. The first `levels_to_ignore`
    /// levels only move the frontier; the following `levels_to_extract` levels
    /// are added to the result. Only edges admitted by `filter` are followed.
    /// Unknown codes contribute nothing.
    ///
    /// # Errors
    /// Returns [`HierarchyError::InvalidArgument`] if either count is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use codedict_loader::{CodeHierarchy, LoadConfig};
    /// use codedict_types::{Direction, RelationshipFilter};
    ///
    /// let source = "C\tEndocrine\nC1\tOther\nC10\tDiabetes\nC10E\tType 1\n";
    /// let hierarchy =
    ///     CodeHierarchy::prefix_coded_from_reader(source.as_bytes(), &LoadConfig::default()).unwrap();
    ///
    /// // Skip the children, take the grandchildren.
    /// let codes = hierarchy
    ///     .relatives(["C1"], Direction::Descendants, &RelationshipFilter::any(), 1, 1)
    ///     .unwrap();
    /// assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec!["C10E".to_string()]);
    /// ```
    pub fn relatives<I, S>(
        &self,
        codes: I,
        direction: Direction,
        filter: &RelationshipFilter,
        levels_to_ignore: i64,
        levels_to_extract: i64,
    ) -> HierarchyResult<HashSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if levels_to_ignore < 0 {
            return Err(HierarchyError::invalid_argument(
                "the levels to ignore must be at least 0",
            ));
        }
        if levels_to_extract < 0 {
            return Err(HierarchyError::invalid_argument(
                "the levels to extract must be at least 0",
            ));
        }

        let mut frontier: HashSet<&str> = codes
            .into_iter()
            .filter_map(|code| self.get_node(code.as_ref()))
            .map(|node| node.code.as_str())
            .collect();
        let mut extracted = HashSet::new();
        let rounds = levels_to_ignore.saturating_add(levels_to_extract);

        let mut round = 0;
        while round < rounds && !frontier.is_empty() {
            let next: HashSet<&str> = frontier
                .iter()
                .flat_map(|code| edges(self.node_or_empty(code), direction))
                .filter(|edge| filter.allows(edge.label()))
                .map(|edge| edge.code.as_str())
                .collect();

            if round >= levels_to_ignore {
                extracted.extend(next.iter().map(|code| code.to_string()));
            }
            frontier = next;
            round += 1;
        }

        Ok(extracted)
    }

    /// Ancestors of `codes`; see [`relatives`](Self::relatives).
    pub fn ancestors<I, S>(
        &self,
        codes: I,
        filter: &RelationshipFilter,
        levels_to_ignore: i64,
        levels_to_extract: i64,
    ) -> HierarchyResult<HashSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.relatives(
            codes,
            Direction::Ancestors,
            filter,
            levels_to_ignore,
            levels_to_extract,
        )
    }

    /// Descendants of `codes`; see [`relatives`](Self::relatives).
    pub fn descendants<I, S>(
        &self,
        codes: I,
        filter: &RelationshipFilter,
        levels_to_ignore: i64,
        levels_to_extract: i64,
    ) -> HierarchyResult<HashSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.relatives(
            codes,
            Direction::Descendants,
            filter,
            levels_to_ignore,
            levels_to_extract,
        )
    }

    /// Every code reachable upwards from `codes`.
    ///
    /// An input code is only included when it is an ancestor of another input code.
    pub fn all_ancestors<I, S>(&self, codes: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.closure(codes, Direction::Ancestors)
    }

    /// Every code reachable downwards from `codes`.
    ///
    /// An input code is only included when it is a descendant of another input code.
    pub fn all_descendants<I, S>(&self, codes: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.closure(codes, Direction::Descendants)
    }

    fn closure<I, S>(&self, codes: I, direction: Direction) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: Vec<&CodeNode> = codes
            .into_iter()
            .filter_map(|code| self.get_node(code.as_ref()))
            .collect();

        while let Some(node) = queue.pop() {
            for edge in edges(node, direction) {
                if visited.insert(edge.code.as_str()) {
                    queue.push(self.node_or_empty(&edge.code));
                }
            }
        }

        visited.into_iter().map(str::to_string).collect()
    }

    /// Codes at `level` reachable from `codes`.
    ///
    /// Codes already at the level are kept. Others are walked down (if above the
    /// level) or up (if below) for at most the level difference, following edges
    /// admitted by `filter`, and only the codes reached at `level` are kept.
    /// Levels grow by at least one along every edge, so a code at `level` is
    /// never further away than that. With no input codes, every code at `level`
    /// is returned. Unknown codes are skipped.
    pub fn codes_at_level<I, S>(
        &self,
        codes: I,
        level: u32,
        filter: &RelationshipFilter,
    ) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reachable = HashSet::new();
        let mut any_input = false;

        for code in codes {
            any_input = true;
            let Some(node) = self.get_node(code.as_ref()) else {
                continue;
            };
            if node.level == level {
                reachable.insert(node.code.clone());
                continue;
            }

            let direction = if node.level < level {
                Direction::Descendants
            } else {
                Direction::Ancestors
            };
            let steps = i64::from(node.level.abs_diff(level));
            reachable.extend(
                self.walk(node, direction, filter, steps)
                    .into_iter()
                    .filter(|code| self.level(code) == level),
            );
        }

        if !any_input {
            return self.all_codes_at_level(level);
        }
        reachable
    }

    /// Every code in the hierarchy at `level`.
    pub fn all_codes_at_level(&self, level: u32) -> HashSet<String> {
        self.nodes()
            .filter(|node| node.level == level)
            .map(|node| node.code.clone())
            .collect()
    }

    fn walk(
        &self,
        node: &CodeNode,
        direction: Direction,
        filter: &RelationshipFilter,
        steps: i64,
    ) -> HashSet<String> {
        // Counts are never negative here.
        self.relatives([node.code.as_str()], direction, filter, 0, steps)
            .unwrap_or_default()
    }
}
