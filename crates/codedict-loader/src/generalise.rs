//! Support-threshold generalisation.
//!
//! Starting from a set of known codes, the hierarchy is climbed from the
//! deepest codes upwards. A parent joins the known set when more than
//! `child_threshold` of its children are already known. Every parent that
//! joins is reported together with all of its descendants.
//!
//! The climb never reaches `search_level`: only parents strictly deeper than
//! it are considered.
//!
//! Codes are processed deepest first, so every child of a parent has been
//! examined before the parent's own support is decided.

use std::collections::{BinaryHeap, HashSet};

use crate::store::CodeHierarchy;

impl CodeHierarchy {
    /// Generalises `initial` codes up the hierarchy.
    ///
    /// Only parents whose level is greater than `search_level` can be added,
    /// so with a search level of 1 the roots are never reached. The result
    /// holds the newly found ancestors and all of their descendants; initial
    /// codes that are not below a new ancestor are not part of it.
    ///
    /// # Example
    ///
    /// ```
    /// use codedict_loader::{CodeHierarchy, LoadConfig};
    ///
    /// let source = "C\tEndocrine\nC1\tOther\nC10\tDiabetes mellitus\nC11\tDiabetes insipidus\n";
    /// let hierarchy =
    ///     CodeHierarchy::prefix_coded_from_reader(source.as_bytes(), &LoadConfig::default()).unwrap();
    ///
    /// let mut general: Vec<_> = hierarchy.generalise(["C10", "C11"], 1, 0.5).into_iter().collect();
    /// general.sort();
    /// assert_eq!(general, vec!["C1", "C10", "C11"]);
    /// ```
    pub fn generalise<I, S>(&self, initial: I, search_level: i64, child_threshold: f64) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known: HashSet<&str> = HashSet::new();
        let mut to_search: BinaryHeap<(u32, &str)> = BinaryHeap::new();

        for code in initial {
            // Unknown codes have no parents to support.
            if let Some(node) = self.get_node(code.as_ref()) {
                known.insert(node.code.as_str());
                to_search.push((node.level, node.code.as_str()));
            }
        }

        let mut generalised: HashSet<&str> = HashSet::new();
        while let Some((_, code)) = to_search.pop() {
            let parents: HashSet<&str> = self
                .node_or_empty(code)
                .parent_codes()
                .filter(|parent| !known.contains(parent))
                .collect();

            for parent in parents {
                let node = self.node_or_empty(parent);
                if i64::from(node.level) <= search_level {
                    continue;
                }
                let children: HashSet<&str> = node.child_codes().collect();
                if children.is_empty() {
                    continue;
                }
                let supporting = children.iter().filter(|c| known.contains(*c)).count();
                let support = supporting as f64 / children.len() as f64;

                if support > child_threshold {
                    known.insert(parent);
                    generalised.insert(parent);
                    to_search.push((node.level, parent));
                }
            }
        }

        let descendants = self.all_descendants(generalised.iter());
        generalised
            .into_iter()
            .map(str::to_string)
            .chain(descendants)
            .collect()
    }
}
