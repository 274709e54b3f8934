//! classify.rs: total score → label, plus the fixed label display table.
//!
//! The two historical variants disagree at the boundary: one compares strictly
//! (`> 0.5` / `< -0.5`), the other inclusively (`>= 0.5` / `<= -0.5`).
//! `Boundary` makes that an explicit knob; `Strict` is the default.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Neutral => "neutral",
            Label::Negative => "negative",
        }
    }

    /// Emoji/color for presentation layers.
    pub fn display(self) -> LabelDisplay {
        DISPLAY_TABLE[self as usize]
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = EngineError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Label::Positive),
            "neutral" => Ok(Label::Neutral),
            "negative" => Ok(Label::Negative),
            other => Err(EngineError::Config(format!("unknown label `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelDisplay {
    pub emoji: &'static str,
    pub color: &'static str,
}

// Indexed by `Label as usize`.
const DISPLAY_TABLE: [LabelDisplay; 3] = [
    LabelDisplay {
        emoji: "😃",
        color: "#2e7d32",
    },
    LabelDisplay {
        emoji: "😐",
        color: "#757575",
    },
    LabelDisplay {
        emoji: "☹️",
        color: "#c62828",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// `score > t` → positive, `score < -t` → negative.
    #[default]
    Strict,
    /// `score >= t` → positive, `score <= -t` → negative.
    Inclusive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    threshold: f64,
    boundary: Boundary,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            boundary: Boundary::Strict,
        }
    }
}

impl Classifier {
    /// Thresholds are symmetric around zero, so `threshold` must be finite and >= 0.
    pub fn new(threshold: f64, boundary: Boundary) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(EngineError::Config(format!(
                "classifier threshold must be finite and non-negative, got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            boundary,
        })
    }

    /// Default ±0.5 threshold with the given boundary mode.
    pub fn with_boundary(boundary: Boundary) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            boundary,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn classify(&self, total: f64) -> Label {
        let t = self.threshold;
        let (pos, neg) = match self.boundary {
            Boundary::Strict => (total > t, total < -t),
            Boundary::Inclusive => (total >= t, total <= -t),
        };
        if pos {
            Label::Positive
        } else if neg {
            Label::Negative
        } else {
            Label::Neutral
        }
    }
}
