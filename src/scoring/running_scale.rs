// src/scoring/running_scale.rs
use super::{Modifiers, ScoringPolicy};
use crate::lexicon::Lexicon;

/// After each scored token the scale moves halfway back to 1.0.
const SCALE_DECAY: f64 = 0.5;
/// Whole-sentence boost when the raw text ends with `!` / `?`.
pub const EXCLAMATION_BOOST: f64 = 1.10;
pub const QUESTION_BOOST: f64 = 1.05;

/// Negators set a flag, (de-)intensifiers compound a scale; both are consumed
/// without scoring. The next ordinary token takes `polarity × scale`, sign
/// flipped if the flag is set.
#[derive(Debug, Clone, Default)]
pub struct RunningScale {
    modifiers: Modifiers,
}

impl RunningScale {
    pub fn new(modifiers: Modifiers) -> Self {
        Self { modifiers }
    }
}

impl ScoringPolicy for RunningScale {
    fn name(&self) -> &'static str {
        "running_scale"
    }

    fn scans_whole_review(&self) -> bool {
        true
    }

    fn score(&self, tokens: &[String], raw: &str, lexicon: &Lexicon) -> f64 {
        let mut total = 0.0;
        let mut negate = false;
        let mut scale = 1.0;

        for t in tokens {
            if self.modifiers.is_negator(t) {
                negate = true;
                continue;
            }
            if let Some(f) = self.modifiers.factor(t) {
                scale *= f;
                continue;
            }
            let mut v = lexicon.polarity(t) * scale;
            if negate {
                v = -v;
                negate = false;
            }
            total += v;
            scale = 1.0 + (scale - 1.0) * SCALE_DECAY;
        }

        match raw.trim_end().chars().last() {
            Some('!') => total * EXCLAMATION_BOOST,
            Some('?') => total * QUESTION_BOOST,
            _ => total,
        }
    }
}
