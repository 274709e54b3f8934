// src/scoring/lookahead.rs
use super::{Modifiers, ScoringPolicy};
use crate::lexicon::Lexicon;

/// A negator or (de-)intensifier applies only to the token right after it,
/// and both are consumed together. Nothing carries over further.
#[derive(Debug, Clone, Default)]
pub struct Lookahead {
    modifiers: Modifiers,
}

impl Lookahead {
    pub fn new(modifiers: Modifiers) -> Self {
        Self { modifiers }
    }
}

impl ScoringPolicy for Lookahead {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn score(&self, tokens: &[String], _raw: &str, lexicon: &Lexicon) -> f64 {
        let mut score = 0.0;
        let mut i = 0;
        while i < tokens.len() {
            let t = tokens[i].as_str();
            if let Some(next) = tokens.get(i + 1) {
                if self.modifiers.is_negator(t) {
                    score -= lexicon.polarity(next);
                    i += 2;
                    continue;
                }
                if let Some(f) = self.modifiers.factor(t) {
                    score += lexicon.polarity(next) * f;
                    i += 2;
                    continue;
                }
            }
            score += lexicon.polarity(t);
            i += 1;
        }
        score
    }
}
