//! Enumeration types for code dictionaries.
//!
//! This module provides enum representations for the kind of hierarchy being
//! built, the direction of a traversal and the polarity of concept terms.

use std::fmt;
use std::str::FromStr;

/// Error returned when a textual name does not match any enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// What was being parsed (e.g. "hierarchy kind").
    pub what: &'static str,
    /// The value that was rejected.
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a permissible {}", self.value, self.what)
    }
}

impl std::error::Error for ParseEnumError {}

/// The kind of code hierarchy, which decides how parents and levels are found.
///
/// # Examples
///
/// ```
/// use codedict_types::HierarchyKind;
///
/// let kind: HierarchyKind = "ReadV2".parse().unwrap();
/// assert_eq!(kind, HierarchyKind::PrefixCoded);
///
/// let kind: HierarchyKind = "snomed".parse().unwrap();
/// assert_eq!(kind, HierarchyKind::ExternallySupplied);
///
/// assert!("icd10".parse::<HierarchyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HierarchyKind {
    /// Parent is the code minus its final character; level is the code length (Read v2).
    #[default]
    PrefixCoded,
    /// Parents come from a separate edge source; levels are derived from the edges (SNOMED).
    ExternallySupplied,
}

impl HierarchyKind {
    /// Returns the canonical command-line name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrefixCoded => "readv2",
            Self::ExternallySupplied => "snomed",
        }
    }
}

impl FromStr for HierarchyKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "readv2" | "prefix" | "prefix_coded" => Ok(Self::PrefixCoded),
            "snomed" | "external" | "externally_supplied" => Ok(Self::ExternallySupplied),
            _ => Err(ParseEnumError {
                what: "hierarchy kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HierarchyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a hierarchy traversal.
///
/// # Examples
///
/// ```
/// use codedict_types::Direction;
///
/// assert_eq!("Parents".parse::<Direction>().unwrap(), Direction::Ancestors);
/// assert_eq!("descendants".parse::<Direction>().unwrap(), Direction::Descendants);
/// assert!("sideways".parse::<Direction>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Follow parent edges.
    Ancestors,
    /// Follow child edges.
    Descendants,
}

impl FromStr for Direction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ancestors" | "parents" => Ok(Self::Ancestors),
            "descendants" | "children" => Ok(Self::Descendants),
            _ => Err(ParseEnumError {
                what: "traversal direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a concept term selects codes for or against the concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// Codes matching the term belong to the concept.
    Positive,
    /// Codes matching the term are excluded from the concept.
    Negative,
}

impl Polarity {
    /// Both polarities, positive first.
    pub const ALL: [Polarity; 2] = [Polarity::Positive, Polarity::Negative];

    /// Returns the upper-case header used in result files.
    pub fn header(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
        }
    }
}

impl FromStr for Polarity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            _ => Err(ParseEnumError {
                what: "term polarity",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_kind_round_trip() {
        for kind in [HierarchyKind::PrefixCoded, HierarchyKind::ExternallySupplied] {
            assert_eq!(kind.as_str().parse::<HierarchyKind>().unwrap(), kind);
        }
        assert_eq!(HierarchyKind::default(), HierarchyKind::PrefixCoded);
    }

    #[test]
    fn test_hierarchy_kind_error_message() {
        let err = "ctv3".parse::<HierarchyKind>().unwrap_err();
        assert_eq!(err.to_string(), "'ctv3' is not a permissible hierarchy kind");
    }

    #[test]
    fn test_polarity_parse() {
        assert_eq!(" Negative ".parse::<Polarity>().unwrap(), Polarity::Negative);
        assert_eq!("POSITIVE".parse::<Polarity>().unwrap(), Polarity::Positive);
        assert!("neutral".parse::<Polarity>().is_err());
        assert_eq!(Polarity::Negative.header(), "NEGATIVE");
    }
}
