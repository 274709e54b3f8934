// src/aggregate/issues.rs
//! Keyword issue categories.
//!
//! A negative review counts once toward every category that has at least one
//! vocabulary word as a substring of the lowercased text.

use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>")]
pub struct IssueCatalog {
    // BTreeMap keeps category iteration order stable.
    categories: BTreeMap<String, Vec<String>>,
}

impl IssueCatalog {
    /// Vocabulary words are lowercased; empty words would match every text
    /// and are rejected.
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut out = BTreeMap::new();
        for (name, words) in categories {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(EngineError::Config("issue category with empty name".into()));
            }
            let mut vocab = Vec::with_capacity(words.len());
            for w in words {
                let w = w.trim().to_lowercase();
                if w.is_empty() {
                    return Err(EngineError::Config(format!(
                        "issue category `{name}` has an empty keyword"
                    )));
                }
                vocab.push(w);
            }
            out.insert(name, vocab);
        }
        Ok(Self { categories: out })
    }

    /// Categories hit by `lowered` (caller lowercases once per review).
    pub fn matching<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |(_, vocab)| vocab.iter().any(|w| lowered.contains(w.as_str())))
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

impl Default for IssueCatalog {
    fn default() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, words)| {
                (
                    name.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for IssueCatalog {
    type Error = EngineError;

    fn try_from(m: BTreeMap<String, Vec<String>>) -> Result<Self> {
        Self::new(m)
    }
}

const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    ("wait", &["wait", "waiting", "delay", "delayed", "queue"]),
    ("staff", &["rude", "unfriendly", "dismissive", "attitude"]),
    ("cleanliness", &["dirty", "unclean", "filthy"]),
    ("billing", &["billing", "charge", "charges", "expensive"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_review_can_hit_several_categories() {
        let c = IssueCatalog::default();
        let hits: Vec<&str> = c
            .matching("long waiting time and a rude, dismissive nurse")
            .collect();
        assert_eq!(hits, vec!["staff", "wait"]);
    }

    #[test]
    fn substring_semantics() {
        let c = IssueCatalog::default();
        // "uncleanliness" contains "unclean"; "surcharge" contains "charge"
        let hits: Vec<&str> = c.matching("uncleanliness and a surcharge").collect();
        assert_eq!(hits, vec!["billing", "cleanliness"]);
        assert_eq!(c.matching("lovely visit").count(), 0);
    }

    #[test]
    fn rejects_empty_keywords() {
        let m = BTreeMap::from([("x".to_string(), vec!["  ".to_string()])]);
        assert!(IssueCatalog::new(m).is_err());
    }

    #[test]
    fn custom_catalog_from_toml() {
        #[derive(Deserialize)]
        struct Wrap {
            issues: IssueCatalog,
        }
        let w: Wrap = toml::from_str(
            r#"
            [issues]
            parking = ["Parking", "garage"]
            "#,
        )
        .unwrap();
        assert_eq!(w.issues.names().collect::<Vec<_>>(), vec!["parking"]);
        assert_eq!(w.issues.matching("no parking nearby").count(), 1);
    }
}
