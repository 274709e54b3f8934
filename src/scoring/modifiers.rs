// src/scoring/modifiers.rs
//! Negator / intensifier / de-intensifier tables.
//!
//! Injected into scoring policies at construction; `Modifiers::default()`
//! carries the fixed tables.

use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawModifiers")]
pub struct Modifiers {
    negators: HashSet<String>,
    intensifiers: HashMap<String, f64>,
    deintensifiers: HashMap<String, f64>,
}

impl Modifiers {
    /// Validated constructor: intensifiers must scale up (> 1.0),
    /// de-intensifiers must scale down (strictly between 0 and 1).
    pub fn new<N, S>(
        negators: N,
        intensifiers: HashMap<String, f64>,
        deintensifiers: HashMap<String, f64>,
    ) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (token, &factor) in &intensifiers {
            if !(factor.is_finite() && factor > 1.0) {
                return Err(EngineError::InvalidModifier {
                    token: token.clone(),
                    factor,
                });
            }
        }
        for (token, &factor) in &deintensifiers {
            if !(factor.is_finite() && factor > 0.0 && factor < 1.0) {
                return Err(EngineError::InvalidModifier {
                    token: token.clone(),
                    factor,
                });
            }
        }
        let lower = |m: HashMap<String, f64>| -> HashMap<String, f64> {
            m.into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v))
                .collect()
        };
        Ok(Self {
            negators: negators
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .collect(),
            intensifiers: lower(intensifiers),
            deintensifiers: lower(deintensifiers),
        })
    }

    #[inline]
    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    /// Scale factor if `token` is an intensifier or de-intensifier.
    #[inline]
    pub fn factor(&self, token: &str) -> Option<f64> {
        self.intensifiers
            .get(token)
            .or_else(|| self.deintensifiers.get(token))
            .copied()
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        let owned = |pairs: &[(&str, f64)]| -> HashMap<String, f64> {
            pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
        };
        Self {
            negators: NEGATORS.iter().map(|s| s.to_string()).collect(),
            intensifiers: owned(INTENSIFIERS),
            deintensifiers: owned(DEINTENSIFIERS),
        }
    }
}

const NEGATORS: &[&str] = &["not", "no", "never", "n't"];
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("really", 1.3),
    ("so", 1.2),
    ("extremely", 1.8),
];
const DEINTENSIFIERS: &[(&str, f64)] = &[("slightly", 0.7), ("somewhat", 0.8), ("barely", 0.6)];

/// Config-file shape; every table is optional and falls back to the default.
#[derive(Debug, Deserialize)]
struct RawModifiers {
    #[serde(default)]
    negators: Option<Vec<String>>,
    #[serde(default)]
    intensifiers: Option<HashMap<String, f64>>,
    #[serde(default)]
    deintensifiers: Option<HashMap<String, f64>>,
}

impl TryFrom<RawModifiers> for Modifiers {
    type Error = EngineError;

    fn try_from(raw: RawModifiers) -> Result<Self> {
        let d = Modifiers::default();
        Modifiers::new(
            raw.negators
                .unwrap_or_else(|| d.negators.into_iter().collect()),
            raw.intensifiers.unwrap_or(d.intensifiers),
            raw.deintensifiers.unwrap_or(d.deintensifiers),
        )
    }
}
