//! Resolving concept terms to codes.

use std::collections::{BTreeSet, HashSet};

use codedict_loader::HierarchyQuery;
use codedict_types::{ConceptCodes, Polarity, TermDefinition};

use crate::definitions::ConceptDefinitions;
use crate::error::DiscoveryResult;

/// The codes found for one concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptResult {
    /// Concept name.
    pub name: String,
    /// Codes found for the concept.
    pub codes: ConceptCodes,
}

/// Settings for generalising positive codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneraliseParams {
    /// Parents at or above this level are never added.
    pub search_level: i64,
    /// Fraction of known children a parent needs to be added.
    pub child_threshold: f64,
}

impl Default for GeneraliseParams {
    fn default() -> Self {
        Self {
            search_level: 1,
            child_threshold: 0.2,
        }
    }
}

impl GeneraliseParams {
    /// Creates generalisation settings.
    pub fn new(search_level: i64, child_threshold: f64) -> Self {
        Self {
            search_level,
            child_threshold,
        }
    }

    /// Clamps the search level to at least 1 and the threshold into `[0, 1]`,
    /// warning about every adjusted value.
    pub fn clamped(self) -> Self {
        let mut params = self;
        if params.search_level < 1 {
            tracing::warn!(
                "The search level provided ({}) is less than 1 and will be treated as if it was 1",
                params.search_level
            );
            params.search_level = 1;
        }
        if params.child_threshold < 0.0 {
            tracing::warn!(
                "The child threshold provided ({:.2}) is less than 0 and will be treated as if it was 0",
                params.child_threshold
            );
            params.child_threshold = 0.0;
        } else if params.child_threshold > 1.0 {
            tracing::warn!(
                "The child threshold provided ({:.2}) is greater than 1 and will be treated as if it was 1",
                params.child_threshold
            );
            params.child_threshold = 1.0;
        }
        params
    }
}

/// Codes selected by any of `terms`.
///
/// A term selects the codes matching all of its phrases and all of its words.
/// A term without words uses the phrase matches alone and a term without
/// phrases the word matches alone.
///
/// # Errors
/// Fails if a phrase is not a valid pattern.
pub fn codes_for_terms(
    hierarchy: &dyn HierarchyQuery,
    terms: &[TermDefinition],
) -> DiscoveryResult<BTreeSet<String>> {
    let word_bags: Vec<Vec<&str>> = terms
        .iter()
        .map(|term| term.words.iter().map(String::as_str).collect())
        .collect();
    let phrase_bags: Vec<Vec<&str>> = terms
        .iter()
        .map(|term| term.phrases.iter().map(String::as_str).collect())
        .collect();

    let by_words = hierarchy.codes_from_words(&word_bags);
    let by_phrases = hierarchy.codes_from_phrases(&phrase_bags)?;

    let mut codes = BTreeSet::new();
    for ((term, words), phrases) in terms.iter().zip(by_words).zip(by_phrases) {
        if term.words.is_empty() {
            codes.extend(phrases);
        } else if term.phrases.is_empty() {
            codes.extend(words);
        } else {
            codes.extend(intersect(words, &phrases));
        }
    }
    Ok(codes)
}

fn intersect(left: HashSet<String>, right: &HashSet<String>) -> impl Iterator<Item = String> + '_ {
    left.into_iter().filter(move |code| right.contains(code))
}

/// Finds the positive and negative codes of every concept, in definition order.
pub fn identify_codes(
    hierarchy: &dyn HierarchyQuery,
    definitions: &ConceptDefinitions,
) -> DiscoveryResult<Vec<ConceptResult>> {
    let mut results = Vec::with_capacity(definitions.len());
    for (name, terms) in definitions.iter() {
        let mut codes = ConceptCodes::default();
        for polarity in Polarity::ALL {
            *codes.codes_mut(polarity) = codes_for_terms(hierarchy, terms.terms(polarity))?;
        }
        tracing::info!(
            "Concept {}: {} positive and {} negative codes",
            name,
            codes.positive.len(),
            codes.negative.len()
        );
        results.push(ConceptResult {
            name: name.to_string(),
            codes,
        });
    }
    Ok(results)
}

/// Finds the codes of every concept and generalises the positive codes that
/// are not also negative.
///
/// `params` are clamped before use; see [`GeneraliseParams::clamped`].
pub fn identify_and_generalise(
    hierarchy: &dyn HierarchyQuery,
    definitions: &ConceptDefinitions,
    params: GeneraliseParams,
) -> DiscoveryResult<Vec<ConceptResult>> {
    let params = params.clamped();
    let mut results = identify_codes(hierarchy, definitions)?;

    for result in &mut results {
        let initial = result.codes.final_positive();
        let initial: Vec<&str> = initial.iter().map(String::as_str).collect();
        let generalised: BTreeSet<String> = hierarchy
            .generalise(&initial, params.search_level, params.child_threshold)
            .into_iter()
            .collect();

        tracing::debug!(
            "Concept {}: generalised {} codes to {}",
            result.name,
            initial.len(),
            generalised.len()
        );
        result.codes.generalised = Some(generalised);
    }
    Ok(results)
}
