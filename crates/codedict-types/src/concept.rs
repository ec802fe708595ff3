//! Concept definition and result types.
//!
//! A concept is defined by positive and negative terms. Each term is a set of
//! quoted phrases plus a bag of unquoted words; resolving the terms against a
//! code dictionary yields positive and negative code sets.

use std::collections::BTreeSet;

use crate::Polarity;

/// One term of a concept definition.
///
/// # Examples
///
/// ```
/// use codedict_types::TermDefinition;
///
/// let term = TermDefinition::new(["type 2"], ["diabetes"]);
/// assert!(term.phrases.contains("type 2"));
/// assert!(term.words.contains("diabetes"));
/// assert!(!term.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermDefinition {
    /// Quoted phrases, all of which must appear in a description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phrases: BTreeSet<String>,
    /// Unquoted words, all of which must appear in a description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub words: BTreeSet<String>,
}

impl TermDefinition {
    /// Creates a term from phrases and words.
    pub fn new<P, W, S, T>(phrases: P, words: W) -> Self
    where
        P: IntoIterator<Item = S>,
        W: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the term has neither phrases nor words.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.words.is_empty()
    }
}

/// The positive and negative terms that define one concept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptTerms {
    /// Terms selecting codes for the concept.
    #[cfg_attr(feature = "serde", serde(rename = "Positive", default))]
    pub positive: Vec<TermDefinition>,
    /// Terms selecting codes to exclude from the concept.
    #[cfg_attr(feature = "serde", serde(rename = "Negative", default))]
    pub negative: Vec<TermDefinition>,
}

impl ConceptTerms {
    /// Returns the terms of the given polarity.
    pub fn terms(&self, polarity: Polarity) -> &[TermDefinition] {
        match polarity {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
        }
    }

    /// Returns the terms of the given polarity for modification.
    pub fn terms_mut(&mut self, polarity: Polarity) -> &mut Vec<TermDefinition> {
        match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
        }
    }
}

/// The codes resolved for one concept.
///
/// # Examples
///
/// ```
/// use codedict_types::ConceptCodes;
///
/// let mut codes = ConceptCodes::default();
/// codes.positive.extend(["C10".to_string(), "C11".to_string()]);
/// codes.negative.insert("C11".to_string());
///
/// let remaining: Vec<_> = codes.final_positive().into_iter().collect();
/// assert_eq!(remaining, vec!["C10".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptCodes {
    /// Codes matched by the positive terms.
    #[cfg_attr(feature = "serde", serde(rename = "Positive"))]
    pub positive: BTreeSet<String>,
    /// Codes matched by the negative terms.
    #[cfg_attr(feature = "serde", serde(rename = "Negative"))]
    pub negative: BTreeSet<String>,
    /// Codes found by generalising the positive codes, when requested.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Generalised", default, skip_serializing_if = "Option::is_none")
    )]
    pub generalised: Option<BTreeSet<String>>,
}

impl ConceptCodes {
    /// Returns the codes of the given polarity.
    pub fn codes(&self, polarity: Polarity) -> &BTreeSet<String> {
        match polarity {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
        }
    }

    /// Returns the codes of the given polarity for modification.
    pub fn codes_mut(&mut self, polarity: Polarity) -> &mut BTreeSet<String> {
        match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
        }
    }

    /// Positive codes that are not also negative.
    pub fn final_positive(&self) -> BTreeSet<String> {
        self.positive.difference(&self.negative).cloned().collect()
    }

    /// Generalised codes together with the positive codes.
    ///
    /// Equal to the positive codes when no generalisation was run.
    pub fn general_positive(&self) -> BTreeSet<String> {
        match &self.generalised {
            Some(generalised) => generalised.union(&self.positive).cloned().collect(),
            None => self.positive.clone(),
        }
    }

    /// Generalised positive codes that are not negative.
    pub fn final_general_positive(&self) -> BTreeSet<String> {
        self.general_positive()
            .difference(&self.negative)
            .cloned()
            .collect()
    }
}
