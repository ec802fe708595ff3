//! Concept definitions.
//!
//! A definition file lists concepts, each with positive and negative terms.
//! Two formats are read:
//!
//! - **Flat file**: `# name` starts a concept, `## positive` / `## negative`
//!   switches the polarity of the following terms (positive by default), and
//!   every other non-blank line is a term. Quoted segments of a term are
//!   phrases, the rest of the line is a bag of words.
//! - **JSON**: `{"name": {"Positive": [{"phrases": [..], "words": [..]}], "Negative": [..]}}`.
//!
//! Concepts keep the order in which they first appear.
//!
//! ```text
//! # type 2 diabetes
//! "type 2" diabetes
//! "non insulin dependent"
//! ## negative
//! "family history"
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use codedict_types::{ConceptTerms, ParseEnumError, Polarity, TermDefinition};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{DiscoveryError, DiscoveryResult};

/// Format of a concept definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConceptSource {
    /// Line-based definition file.
    #[default]
    FlatFile,
    /// JSON definition file.
    Json,
}

impl ConceptSource {
    /// Returns the command-line name of the source format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FlatFile => "flatfile",
            Self::Json => "json",
        }
    }
}

impl FromStr for ConceptSource {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flatfile" => Ok(Self::FlatFile),
            "json" => Ok(Self::Json),
            _ => Err(ParseEnumError {
                what: "concept source",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConceptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered collection of concepts and their terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptDefinitions {
    concepts: Vec<(String, ConceptTerms)>,
}

impl ConceptDefinitions {
    /// Reads a definition file in the given format.
    pub fn from_path(path: &Path, source: ConceptSource) -> DiscoveryResult<Self> {
        if !path.is_file() {
            return Err(DiscoveryError::file_not_found(path));
        }
        let definitions = match source {
            ConceptSource::FlatFile => {
                let file = std::fs::File::open(path)?;
                Self::from_flat_file(std::io::BufReader::new(file))?
            }
            ConceptSource::Json => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str(&text).map_err(|e| DiscoveryError::json(path, e))?
            }
        };
        tracing::info!(
            "Read {} concept definitions from {}",
            definitions.len(),
            path.display()
        );
        Ok(definitions)
    }

    /// Parses the flat file format.
    ///
    /// Terms that are made only of phrases are merged into a single
    /// alternation term per concept and polarity, so a description matching
    /// any one of those phrases is selected.
    ///
    /// # Errors
    /// Returns [`DiscoveryError::InvalidDefinition`] for a term before the
    /// first concept or a concept with an empty name.
    pub fn from_flat_file<R: BufRead>(reader: R) -> DiscoveryResult<Self> {
        let mut definitions = Self::default();
        let mut current: Option<usize> = None;
        let mut polarity = Polarity::Positive;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            if let Some(header) = line.strip_prefix("##") {
                match header.parse::<Polarity>() {
                    Ok(p) => polarity = p,
                    Err(_) => tracing::warn!(
                        "Term type header \"{}\" on line {} is not positive or negative; terms stay {:?}",
                        line.trim(),
                        line_no,
                        polarity
                    ),
                }
            } else if let Some(name) = line.strip_prefix('#') {
                let name = name.split_whitespace().collect::<Vec<_>>().join("_");
                if name.is_empty() {
                    return Err(DiscoveryError::InvalidDefinition {
                        line: line_no,
                        reason: "concept name is empty".to_string(),
                    });
                }
                current = Some(definitions.position_or_insert(name));
                polarity = Polarity::Positive;
            } else if !line.trim().is_empty() {
                let Some(concept) = current else {
                    return Err(DiscoveryError::InvalidDefinition {
                        line: line_no,
                        reason: "term appears before any concept".to_string(),
                    });
                };
                let term = parse_term(&line);
                if !term.is_empty() {
                    definitions.concepts[concept].1.terms_mut(polarity).push(term);
                }
            }
        }

        for (_, terms) in &mut definitions.concepts {
            for polarity in Polarity::ALL {
                merge_phrase_only_terms(terms.terms_mut(polarity));
            }
        }
        Ok(definitions)
    }

    /// Adds a concept, replacing the terms of an existing concept of the same name.
    pub fn insert(&mut self, name: impl Into<String>, terms: ConceptTerms) {
        let index = self.position_or_insert(name.into());
        self.concepts[index].1 = terms;
    }

    /// Terms of a concept.
    pub fn get(&self, name: &str) -> Option<&ConceptTerms> {
        self.concepts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, terms)| terms)
    }

    /// Concept names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.concepts.iter().map(|(name, _)| name.as_str())
    }

    /// Concepts and their terms in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConceptTerms)> {
        self.concepts.iter().map(|(name, terms)| (name.as_str(), terms))
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if no concepts are defined.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    fn position_or_insert(&mut self, name: String) -> usize {
        match self.concepts.iter().position(|(n, _)| *n == name) {
            Some(index) => index,
            None => {
                self.concepts.push((name, ConceptTerms::default()));
                self.concepts.len() - 1
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConceptDefinitions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConceptsVisitor;

        impl<'de> Visitor<'de> for ConceptsVisitor {
            type Value = ConceptDefinitions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from concept names to their terms")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut definitions = ConceptDefinitions::default();
                while let Some((name, terms)) = map.next_entry::<String, ConceptTerms>()? {
                    definitions.insert(name, terms);
                }
                Ok(definitions)
            }
        }

        deserializer.deserialize_map(ConceptsVisitor)
    }
}

/// Splits a term line into quoted phrases and unquoted words.
///
/// An unmatched quote is kept as part of the words.
fn parse_term(line: &str) -> TermDefinition {
    let line = line.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut phrases = BTreeSet::new();
    let mut unquoted = String::new();
    let mut rest = line.as_str();
    while let Some(open) = rest.find('"') {
        let Some(close) = rest[open + 1..].find('"') else {
            break;
        };
        unquoted.push_str(&rest[..open]);
        unquoted.push(' ');
        let phrase = &rest[open + 1..open + 1 + close];
        if !phrase.trim().is_empty() {
            phrases.insert(phrase.to_string());
        }
        rest = &rest[open + close + 2..];
    }
    unquoted.push_str(rest);

    TermDefinition {
        phrases,
        words: unquoted.split_whitespace().map(str::to_string).collect(),
    }
}

fn merge_phrase_only_terms(terms: &mut Vec<TermDefinition>) {
    let mut alternatives = BTreeSet::new();
    terms.retain(|term| {
        if term.words.is_empty() {
            alternatives.extend(term.phrases.iter().cloned());
            false
        } else {
            true
        }
    });

    if !alternatives.is_empty() {
        let joined = alternatives.into_iter().collect::<Vec<_>>().join("|");
        terms.push(TermDefinition::new([format!("({joined})")], Vec::<String>::new()));
    }
}
