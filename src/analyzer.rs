//! # Analyzer
//! Per-review pipeline: normalize → split sentences → tokenize (+ stopwords)
//! → score each sentence → total (sum of sentences, or one whole-review scan
//! for policies that carry state across sentences) → classify the total → most ± sentence → strongest segment.
//!
//! Pure function of `(text, lexicon, options)`; no I/O, no hidden state.

use crate::classify::{Boundary, Classifier, Label};
use crate::lexicon::Lexicon;
use crate::scoring::{Lookahead, Modifiers, RunningScale, ScoringPolicy};
use crate::segment::{strongest_segment, ScoredSentence, Segment};
use crate::text::{self, Tokenization};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_score: f64,
    pub label: Label,
    pub sentence_scores: Vec<ScoredSentence>,
    pub most_positive: ScoredSentence,
    pub most_negative: ScoredSentence,
    pub strongest_segment: Segment,
}

impl AnalysisResult {
    /// Neutral zero-score result for empty / whitespace-only input.
    pub fn empty() -> Self {
        Self {
            total_score: 0.0,
            label: Label::Neutral,
            sentence_scores: Vec::new(),
            most_positive: ScoredSentence::empty(),
            most_negative: ScoredSentence::empty(),
            strongest_segment: Segment::empty(),
        }
    }
}

/// One scoring profile: how to tokenize, whether to drop stopwords,
/// which policy scores tokens, and how totals become labels.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub tokenization: Tokenization,
    pub drop_stopwords: bool,
    pub policy: Arc<dyn ScoringPolicy>,
    pub classifier: Classifier,
}

impl Default for AnalyzerOptions {
    /// Canonical profile: punctuation stripping, stopwords dropped,
    /// lookahead scoring, strict ±0.5 thresholds.
    fn default() -> Self {
        Self {
            tokenization: Tokenization::StripPunct,
            drop_stopwords: true,
            policy: Arc::new(Lookahead::new(Modifiers::default())),
            classifier: Classifier::default(),
        }
    }
}

impl AnalyzerOptions {
    /// Alternate profile: per-token edge trimming (inner apostrophes kept), no stopword
    /// removal, running-scale scoring, inclusive ±0.5 thresholds.
    pub fn running_scale() -> Self {
        Self {
            tokenization: Tokenization::TrimEdges,
            drop_stopwords: false,
            policy: Arc::new(RunningScale::new(Modifiers::default())),
            classifier: Classifier::with_boundary(Boundary::Inclusive),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    lexicon: Arc<Lexicon>,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(lexicon: Arc<Lexicon>, options: AnalyzerOptions) -> Self {
        Self { lexicon, options }
    }

    /// Canonical profile over the given lexicon.
    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self::new(lexicon, AnalyzerOptions::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn classify(&self, total: f64) -> Label {
        self.options.classifier.classify(total)
    }

    /// Tokens of one sentence as the scorer sees them.
    pub fn sentence_tokens(&self, sentence: &str) -> Vec<String> {
        let tokens = self.options.tokenization.tokenize(sentence);
        if self.options.drop_stopwords {
            text::drop_stopwords(tokens)
        } else {
            tokens
        }
    }

    pub fn analyze(&self, input: &str) -> AnalysisResult {
        let norm = text::normalize(input);
        let sentences = text::split_sentences(&norm);
        if sentences.is_empty() {
            return AnalysisResult::empty();
        }

        let policy = &self.options.policy;
        let whole_review = policy.scans_whole_review();
        let mut scored = Vec::with_capacity(sentences.len());
        let mut flat = Vec::new();
        let mut sum = 0.0;
        for s in sentences {
            let tokens = self.sentence_tokens(&s);
            let sc = policy.score(&tokens, &s, &self.lexicon);
            sum += sc;
            if whole_review {
                flat.extend(tokens);
            }
            scored.push(ScoredSentence::new(s, sc));
        }
        // sentence scores stay per sentence for display and segments
        let total = if whole_review {
            policy.score(&flat, &norm, &self.lexicon)
        } else {
            sum
        };

        let most_positive = extreme(&scored, |cand, best| cand > best);
        let most_negative = extreme(&scored, |cand, best| cand < best);
        let strongest_segment = strongest_segment(&scored);

        AnalysisResult {
            total_score: total,
            label: self.classify(total),
            sentence_scores: scored,
            most_positive,
            most_negative,
            strongest_segment,
        }
    }
}

/// First sentence that no later sentence strictly beats under `beats`.
fn extreme(scored: &[ScoredSentence], beats: impl Fn(f64, f64) -> bool) -> ScoredSentence {
    let mut iter = scored.iter();
    let Some(mut best) = iter.next() else {
        return ScoredSentence::empty();
    };
    for s in iter {
        if beats(s.score, best.score) {
            best = s;
        }
    }
    best.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(pairs: &[(&str, f64)]) -> Analyzer {
        let lx = Lexicon::from_pairs(pairs.iter().copied()).unwrap();
        Analyzer::with_lexicon(Arc::new(lx))
    }

    #[test]
    fn empty_and_whitespace_are_neutral_zero() {
        let a = analyzer(&[("good", 1.5)]);
        for input in ["", "   \t\n"] {
            let r = a.analyze(input);
            assert_eq!(r.label, Label::Neutral);
            assert_eq!(r.total_score, 0.0);
            assert!(r.sentence_scores.is_empty());
            assert_eq!(r.strongest_segment, Segment::empty());
        }
    }

    #[test]
    fn sentences_keep_punctuation_and_order() {
        let a = analyzer(&[("good", 1.5), ("bad", -1.5)]);
        let r = a.analyze("Good nurse. BAD desk!");
        let texts: Vec<&str> = r.sentence_scores.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["good nurse.", "bad desk!"]);
        assert_eq!(r.total_score, 0.0);
        assert_eq!(r.most_positive.text, "good nurse.");
        assert_eq!(r.most_negative.text, "bad desk!");
    }

    #[test]
    fn extremes_prefer_first_occurrence() {
        let a = analyzer(&[("good", 1.5)]);
        let r = a.analyze("good. good. meh.");
        assert_eq!(r.most_positive.text, "good.");
        assert_eq!(r.most_positive, r.sentence_scores[0]);
        // min is "meh." (0.0), the only sentence below 1.5
        assert_eq!(r.most_negative.text, "meh.");
    }

    #[test]
    fn stopword_so_never_intensifies_in_default_profile() {
        let a = analyzer(&[("good", 1.5)]);
        assert_eq!(a.analyze("so good").total_score, 1.5);
        assert_eq!(a.analyze("very good").total_score, 2.25);
    }

    #[test]
    fn running_scale_profile_keeps_contractions() {
        let lx = Arc::new(Lexicon::from_pairs([("good", 1.5)]).unwrap());
        let a = Analyzer::new(lx, AnalyzerOptions::running_scale());
        assert_eq!(a.sentence_tokens("wasn't good"), vec!["wasn't", "good"]);
        assert_eq!(a.analyze("so good").total_score, 1.5 * 1.2);
        // inclusive boundary: exactly 0.5 is positive
        let lx = Arc::new(Lexicon::from_pairs([("fine", 0.5)]).unwrap());
        let a = Analyzer::new(lx, AnalyzerOptions::running_scale());
        assert_eq!(a.analyze("fine").label, Label::Positive);
    }

    #[test]
    fn running_scale_total_spans_sentence_breaks() {
        let lx = Arc::new(Lexicon::from_pairs([("great", 2.0), ("good", 1.5)]).unwrap());
        let a = Analyzer::new(lx, AnalyzerOptions::running_scale());

        // "!" inside the review does not boost; only the review's last char counts
        let r = a.analyze("Great! It was okay.");
        assert_eq!(r.total_score, 2.0);
        assert_eq!(r.sentence_scores[0].score, 2.0 * 1.10);

        // the negator carries into the next sentence
        let r = a.analyze("It was not. Good.");
        assert_eq!(r.total_score, -1.5);
        assert_eq!(r.label, Label::Negative);
        assert_eq!(r.sentence_scores[1].score, 1.5);

        assert_eq!(a.analyze("It was okay. Great!").total_score, 2.0 * 1.10);
    }
}
