//! # codedict-types
//!
//! Type definitions for hierarchical clinical code dictionaries.
//!
//! This crate provides the data model shared by the loader and the concept
//! discovery tooling: hierarchy nodes and edges, the hierarchy kinds, traversal
//! directions, relationship filters, source records and concept definitions.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use codedict_types::{CodeNode, Direction, Edge, HierarchyKind, RelationshipFilter};
//!
//! let mut node = CodeNode::new("C10", 3, "Diabetes mellitus");
//! node.parents.push(Edge::unlabeled("C1"));
//!
//! let kind: HierarchyKind = "readv2".parse().unwrap();
//! assert_eq!(kind, HierarchyKind::PrefixCoded);
//!
//! let filter = RelationshipFilter::only(["is_a"]).with_unlabeled();
//! assert!(node.parents.iter().all(|e| filter.allows(e.label())));
//! assert_eq!("parents".parse::<Direction>().unwrap(), Direction::Ancestors);
//! ```

#![warn(missing_docs)]

mod concept;
mod enums;
mod filter;
mod node;
mod record;

// Re-export all public types at crate root
pub use concept::{ConceptCodes, ConceptTerms, TermDefinition};
pub use enums::{Direction, HierarchyKind, ParseEnumError, Polarity};
pub use filter::RelationshipFilter;
pub use node::{CodeNode, Edge};
pub use record::{CodeDescription, HierarchyEdge};
