//! # Strongest Segment
//! Sliding windows of 1..=3 sentences over per-sentence scores.
//!
//! The window with the largest absolute sum wins; a later window replaces the
//! current best only if strictly larger, so the first-seen window wins ties.
//! The search starts from an empty zero-score segment.
//! Window lengths are tried shortest first.

use serde::{Deserialize, Serialize};

/// Longest window considered.
pub const MAX_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub text: String,
    pub score: f64,
}

impl ScoredSentence {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    pub fn empty() -> Self {
        Self::new("", 0.0)
    }
}

/// Contiguous sentence run `[start_index, end_index]` (inclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_index: usize,
    pub end_index: usize,
    pub score: f64,
    pub text: String,
}

impl Segment {
    pub fn empty() -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            score: 0.0,
            text: String::new(),
        }
    }
}

/// Best window, or `Segment::empty()` when no window beats a zero score
/// (no sentences, or every sentence scored 0).
pub fn strongest_segment(sentences: &[ScoredSentence]) -> Segment {
    let n = sentences.len();
    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_abs = 0.0_f64;

    for w in 1..=MAX_WINDOW.min(n) {
        for start in 0..=(n - w) {
            let sum: f64 = sentences[start..start + w].iter().map(|s| s.score).sum();
            if sum.abs() > best_abs {
                best_abs = sum.abs();
                best = Some((start, w, sum));
            }
        }
    }

    match best {
        Some((start, w, score)) => Segment {
            start_index: start,
            end_index: start + w - 1,
            score,
            text: sentences[start..start + w]
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        },
        None => Segment::empty(),
    }
}
