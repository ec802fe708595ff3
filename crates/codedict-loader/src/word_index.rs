//! Inverted word index over code descriptions.

use std::collections::{HashMap, HashSet};

/// Maps each lower-cased description token to the codes whose description contains it.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    index: HashMap<String, HashSet<String>>,
}

impl WordIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every token of `description` under `code`.
    pub fn insert(&mut self, code: &str, description: &str) {
        for token in tokenize(description) {
            let codes = self.index.entry(token).or_default();
            if !codes.contains(code) {
                codes.insert(code.to_string());
            }
        }
    }

    /// Returns the codes indexed under a single token.
    pub fn codes_for(&self, token: &str) -> Option<&HashSet<String>> {
        self.index.get(&token.to_lowercase())
    }

    /// Returns the codes whose descriptions contain every one of `tokens`.
    ///
    /// An empty bag matches nothing.
    pub fn codes_for_all<I, S>(&self, tokens: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut postings = Vec::new();
        for token in tokens {
            match self.codes_for(token.as_ref()) {
                Some(codes) => postings.push(codes),
                None => return HashSet::new(),
            }
        }

        postings.sort_by_key(|codes| codes.len());
        let Some((smallest, rest)) = postings.split_first() else {
            return HashSet::new();
        };

        smallest
            .iter()
            .filter(|code| rest.iter().all(|codes| codes.contains(*code)))
            .cloned()
            .collect()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Splits a description into lower-cased tokens.
///
/// A leading bracket tag such as `[V]` is separated from the word it is glued to,
/// so `[V]Family history` yields `[v]`, `family`, `history`.
pub fn tokenize(description: &str) -> Vec<String> {
    let (tag, rest) = split_bracket_tag(description.trim_start());
    tag.into_iter()
        .chain(rest.split_whitespace())
        .map(str::to_lowercase)
        .collect()
}

fn split_bracket_tag(text: &str) -> (Option<&str>, &str) {
    if let Some(stripped) = text.strip_prefix('[') {
        if let Some(end) = stripped.find(']') {
            let name = &stripped[..end];
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
                let tag_len = end + 2;
                return (Some(&text[..tag_len]), &text[tag_len..]);
            }
        }
    }
    (None, text)
}
