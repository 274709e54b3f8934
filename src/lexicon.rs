//! # Lexicon
//!
//! Immutable token → polarity table.
//!
//! - Keys are lowercased and trimmed at construction; duplicates after that
//!   normalization are rejected.
//! - Unknown tokens resolve to `0.0`, never an error.
//! - Loads from a JSON object (`{"good": 1.5, ...}`) or falls back to the
//!   built-in `tiny()` seed.
//!
//! Shared read-only as `Arc<Lexicon>` across analyses.

use crate::error::{EngineError, Result};
use std::{collections::HashMap, fs, path::Path};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
}

impl Lexicon {
    /// Build from `(token, polarity)` pairs. Fails fast on empty tokens,
    /// non-finite polarities, or keys that collide once lowercased.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (raw, polarity) in pairs {
            let token = normalize_key(raw.as_ref());
            if token.is_empty() {
                return Err(EngineError::InvalidLexicon {
                    token: raw.as_ref().to_string(),
                    reason: "empty token".into(),
                });
            }
            if !polarity.is_finite() {
                return Err(EngineError::InvalidLexicon {
                    token,
                    reason: format!("non-finite polarity {polarity}"),
                });
            }
            if entries.insert(token.clone(), polarity).is_some() {
                return Err(EngineError::InvalidLexicon {
                    token,
                    reason: "duplicate key after case normalization".into(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON object of `token: polarity`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        // Keys that differ only by case still collide in `from_pairs`.
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(s)?;
        let mut pairs = Vec::with_capacity(raw.len());
        for (k, v) in raw {
            let p = v.as_f64().ok_or_else(|| EngineError::InvalidLexicon {
                token: k.clone(),
                reason: format!("polarity is not a number: {v}"),
            })?;
            pairs.push((k, p));
        }
        Self::from_pairs(pairs)
    }

    /// Load a JSON lexicon file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Polarity for an already-normalized token (0.0 if unknown).
    #[inline]
    pub fn polarity(&self, token: &str) -> f64 {
        self.entries.get(token).copied().unwrap_or(0.0)
    }

    /// Whether the token is present at all (a 0.0 entry still counts).
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Small handcrafted clinic-review lexicon used when no file is configured.
    pub fn tiny() -> Self {
        let entries = TINY_SEED
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect();
        Self { entries }
    }
}

fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

const TINY_SEED: &[(&str, f64)] = &[
    // positives
    ("good", 1.5),
    ("great", 2.0),
    ("excellent", 2.5),
    ("clean", 0.8),
    ("pleasant", 0.9),
    ("welcoming", 1.2),
    ("attentive", 1.3),
    ("efficient", 1.0),
    ("fantastic", 2.2),
    ("glad", 0.7),
    ("hospitable", 1.4),
    ("friendly", 1.2),
    ("helpful", 1.1),
    ("quick", 0.7),
    ("professional", 1.1),
    ("bedside", 0.4),
    ("manner", 0.3),
    // negatives
    ("bad", -1.5),
    ("worst", -2.5),
    ("dirty", -1.5),
    ("rude", -2.0),
    ("slow", -0.9),
    ("unpleasant", -1.2),
    ("unwelcoming", -1.3),
    ("inefficient", -1.1),
    ("painful", -1.0),
    ("confusing", -0.8),
    ("expensive", -0.7),
    ("wait", -0.4),
    ("waiting", -0.4),
    ("crowded", -0.7),
    ("skeptical", -0.3),
    // domain hints
    ("doctor", 0.4),
    ("nurse", 0.3),
    ("front", 0.0),
    ("desk", 0.0),
    ("clinic", 0.2),
    ("care", 0.3),
    ("urgent", 0.0),
    ("health", 0.2),
    ("area", 0.0),
    ("rooms", 0.0),
];
