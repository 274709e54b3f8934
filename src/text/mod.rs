// src/text/mod.rs
//! Normalization and tokenization.
//!
//! Three tokenizations live side by side and are never unified:
//! - `Tokenization::StripPunct`: drop a fixed punctuation set, split on whitespace (analyzer default)
//! - `Tokenization::TrimEdges`: split on whitespace, trim non-alphanumerics at both ends of each piece
//! - `keyword_split`: split on commas, periods and whitespace only; the aggregator's
//!   coarse term counting, deliberately not selectable for sentence scoring

pub mod sentences;

pub use sentences::split_sentences;

use serde::{Deserialize, Serialize};

/// Characters removed by `Tokenization::StripPunct`.
pub const PUNCT: &[char] = &[
    ',', '.', '!', '?', ':', ';', '"', '\'', '(', ')', '[', ']', '{', '}', '-', '/', '\\',
];

/// Small handcrafted stopword set.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "so", "to", "of", "for", "in", "on", "at",
    "with", "this", "that", "these", "those", "it", "is", "are", "was", "were", "be", "been",
    "being", "i", "you", "he", "she", "they", "we", "me", "him", "her", "them", "my", "your",
    "our", "their",
];

/// Lowercase and trim surrounding whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokenization {
    #[default]
    StripPunct,
    TrimEdges,
}

impl Tokenization {
    /// Tokenize already-normalized text.
    pub fn tokenize(self, text: &str) -> Vec<String> {
        match self {
            Tokenization::StripPunct => strip_punct(text)
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            Tokenization::TrimEdges => text
                .split_whitespace()
                .map(|piece| piece.trim_matches(|c: char| !c.is_alphanumeric()))
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Coarse split used for negative-term counting: other punctuation stays attached.
pub fn keyword_split(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(|c: char| c == ',' || c == '.' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn strip_punct(text: &str) -> String {
    text.chars().filter(|c| !PUNCT.contains(c)).collect()
}

#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

pub fn drop_stopwords(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|t| !is_stopword(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize("  The Nurse WAS Great!  "), "the nurse was great!");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn strip_punct_removes_apostrophes_too() {
        let t = Tokenization::StripPunct.tokenize("wasn't (very) good, really-good!");
        assert_eq!(t, vec!["wasnt", "very", "good", "reallygood"]);
    }

    #[test]
    fn trim_edges_keeps_inner_characters() {
        let t = Tokenization::TrimEdges.tokenize("\"wasn't\" good... -- ok!?");
        assert_eq!(t, vec!["wasn't", "good", "ok"]);
    }

    #[test]
    fn keyword_split_only_breaks_on_comma_and_period() {
        let t: Vec<&str> = keyword_split("rude,dirty. slow! wait").collect();
        assert_eq!(t, vec!["rude", "dirty", "slow!", "wait"]);
    }

    #[test]
    fn stopwords_are_dropped() {
        let toks = Tokenization::StripPunct.tokenize("the staff was so rude");
        assert_eq!(drop_stopwords(toks), vec!["staff", "rude"]);
    }
}
