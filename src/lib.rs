// src/lib.rs
// Public library surface for the demo binary and integration tests.

pub mod error;

// Per-review engine
pub mod analyzer;
pub mod classify;
pub mod lexicon;
pub mod scoring;
pub mod segment;
pub mod text;

// Batch metrics
pub mod aggregate;
pub mod period;

pub mod config;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{
    AggregateOptions, Aggregator, IssueCatalog, MetricCounts, MetricsSnapshot, ReviewRecord,
};
pub use crate::analyzer::{AnalysisResult, Analyzer, AnalyzerOptions};
pub use crate::classify::{Boundary, Classifier, Label, LabelDisplay};
pub use crate::config::EngineConfig;
pub use crate::error::{EngineError, Result};
pub use crate::lexicon::Lexicon;
pub use crate::scoring::{Modifiers, PolicyKind, ScoringPolicy};
pub use crate::segment::{ScoredSentence, Segment};
pub use crate::text::Tokenization;
