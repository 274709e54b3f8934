// src/scoring/mod.rs
//! Modifier-aware token scoring.
//!
//! Two policies sit behind `ScoringPolicy` and are kept numerically separate:
//! - `Lookahead` (default): a modifier consumes itself plus the next token
//! - `RunningScale`: modifiers set a negate flag / multiplicative scale that the
//!   next scored token consumes, with decay and a trailing `!`/`?` boost
//!
//! Both take the tokens of one sentence plus the raw sentence text.

pub mod lookahead;
pub mod modifiers;
pub mod running_scale;

pub use lookahead::Lookahead;
pub use modifiers::Modifiers;
pub use running_scale::RunningScale;

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc};

pub trait ScoringPolicy: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Score one token sequence. `raw` is the text the tokens were cut from.
    fn score(&self, tokens: &[String], raw: &str, lexicon: &Lexicon) -> f64;

    /// When true, the review total is one scan over every token of the review
    /// (`raw` = the normalized review), not the sum of sentence scores.
    fn scans_whole_review(&self) -> bool {
        false
    }
}

/// Config-level selector for the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Lookahead,
    RunningScale,
}

impl PolicyKind {
    pub fn build(self, modifiers: Modifiers) -> Arc<dyn ScoringPolicy> {
        match self {
            PolicyKind::Lookahead => Arc::new(Lookahead::new(modifiers)),
            PolicyKind::RunningScale => Arc::new(RunningScale::new(modifiers)),
        }
    }
}
