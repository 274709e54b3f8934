// src/aggregate/mod.rs
//! One-pass aggregation over review records.
//!
//! Per record with non-empty text:
//! 1) label (precomputed if parseable, otherwise the analyzer's)
//! 2) rating bucket `"1"`..`"5"` / `"NA"`
//! 3) period label counts
//! 4) negatives only: region count, keyword issue buckets, negative lexicon terms
//!
//! Counters live in `MetricCounts`, which merges by summation (commutative and
//! associative), so disjoint partitions can be folded independently and
//! combined before Top-K runs.

pub mod issues;
pub mod record;
pub mod topk;

pub use issues::IssueCatalog;
pub use record::{bucket_rating, ReviewRecord};
pub use topk::top_k;

use crate::analyzer::Analyzer;
use crate::classify::Label;
use crate::text::keyword_split;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const DEFAULT_TOP_REGIONS: usize = 10;
pub const DEFAULT_TOP_TERMS: usize = 15;

/// Rating buckets in display order.
pub const RATING_BUCKETS: [&str; 6] = ["1", "2", "3", "4", "5", record::RATING_NA];

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("caresense_rows_total", "Rows pulled from the row source.");
        describe_counter!(
            "caresense_rows_skipped_total",
            "Rows skipped because their text was empty."
        );
        describe_counter!(
            "caresense_negative_rows_total",
            "Rows labeled negative during aggregation."
        );
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Stop pulling rows after this many (skipped rows count too).
    pub row_cap: Option<usize>,
    pub top_regions: usize,
    pub top_terms: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            row_cap: None,
            top_regions: DEFAULT_TOP_REGIONS,
            top_terms: DEFAULT_TOP_TERMS,
        }
    }
}

/// Mergeable partial state; full maps, no Top-K applied yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCounts {
    pub rows_seen: u64,
    pub rows_skipped: u64,
    pub label_counts: BTreeMap<Label, u64>,
    pub rating_histogram: BTreeMap<String, u64>,
    pub issues_by_region: BTreeMap<String, u64>,
    pub issue_buckets: BTreeMap<String, u64>,
    pub negative_terms: BTreeMap<String, u64>,
    pub labels_by_period: BTreeMap<String, BTreeMap<Label, u64>>,
}

impl MetricCounts {
    /// Sum `other` into `self`.
    pub fn merge(&mut self, other: MetricCounts) {
        self.rows_seen += other.rows_seen;
        self.rows_skipped += other.rows_skipped;
        add_counts(&mut self.label_counts, other.label_counts);
        add_counts(&mut self.rating_histogram, other.rating_histogram);
        add_counts(&mut self.issues_by_region, other.issues_by_region);
        add_counts(&mut self.issue_buckets, other.issue_buckets);
        add_counts(&mut self.negative_terms, other.negative_terms);
        for (period, labels) in other.labels_by_period {
            add_counts(self.labels_by_period.entry(period).or_default(), labels);
        }
    }

    pub fn merged(mut self, other: MetricCounts) -> Self {
        self.merge(other);
        self
    }

    /// Rows that were labeled (pulled minus skipped).
    pub fn rows_labeled(&self) -> u64 {
        self.label_counts.values().sum()
    }

    pub fn snapshot(&self, top_regions: usize, top_terms: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            label_counts: self.label_counts.clone(),
            rating_histogram: self.rating_histogram.clone(),
            issues_by_region_top: top_k(&self.issues_by_region, top_regions),
            issue_buckets: self.issue_buckets.clone(),
            negative_terms_top: top_k(&self.negative_terms, top_terms),
            labels_by_period: self.labels_by_period.clone(),
        }
    }
}

fn add_counts<K: Ord>(into: &mut BTreeMap<K, u64>, from: BTreeMap<K, u64>) {
    for (k, v) in from {
        *into.entry(k).or_insert(0) += v;
    }
}

fn bump<K: Ord>(map: &mut BTreeMap<K, u64>, key: K) {
    *map.entry(key).or_insert(0) += 1;
}

/// Aggregate view handed to presentation layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub label_counts: BTreeMap<Label, u64>,
    pub rating_histogram: BTreeMap<String, u64>,
    pub issues_by_region_top: Vec<(String, u64)>,
    pub issue_buckets: BTreeMap<String, u64>,
    pub negative_terms_top: Vec<(String, u64)>,
    pub labels_by_period: BTreeMap<String, BTreeMap<Label, u64>>,
}

impl MetricsSnapshot {
    /// Histogram in `1..5, NA` order with zeros filled in.
    pub fn rating_histogram_ordered(&self) -> Vec<(&'static str, u64)> {
        RATING_BUCKETS
            .iter()
            .map(|&b| (b, self.rating_histogram.get(b).copied().unwrap_or(0)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    analyzer: Analyzer,
    issues: IssueCatalog,
    options: AggregateOptions,
}

impl Aggregator {
    pub fn new(analyzer: Analyzer, issues: IssueCatalog, options: AggregateOptions) -> Self {
        Self {
            analyzer,
            issues,
            options,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn options(&self) -> &AggregateOptions {
        &self.options
    }

    /// Fold one record into `counts`.
    pub fn observe(&self, counts: &mut MetricCounts, record: &ReviewRecord) {
        counts.rows_seen += 1;

        let text = record.text.trim();
        if text.is_empty() {
            counts.rows_skipped += 1;
            return;
        }

        let label = match record.precomputed_label() {
            Some(l) => l,
            None => self.analyzer.analyze(text).label,
        };
        bump(&mut counts.label_counts, label);
        bump(
            &mut counts.rating_histogram,
            bucket_rating(record.rating.as_deref()),
        );
        bump(
            counts
                .labels_by_period
                .entry(record.period().to_string())
                .or_default(),
            label,
        );

        if label != Label::Negative {
            return;
        }

        bump(
            &mut counts.issues_by_region,
            record.region_or_unknown().to_string(),
        );
        let lowered = text.to_lowercase();
        for category in self.issues.matching(&lowered) {
            bump(&mut counts.issue_buckets, category.to_string());
        }
        let lexicon = self.analyzer.lexicon();
        for term in keyword_split(&lowered) {
            if lexicon.polarity(term) < 0.0 {
                bump(&mut counts.negative_terms, term.to_string());
            }
        }
    }

    /// Single forward pass; honors `row_cap` by not pulling further rows.
    pub fn fold<I>(&self, rows: I) -> MetricCounts
    where
        I: IntoIterator,
        I::Item: Borrow<ReviewRecord>,
    {
        ensure_metrics_described();

        let cap = self.options.row_cap.unwrap_or(usize::MAX);
        let mut counts = MetricCounts::default();
        for row in rows.into_iter().take(cap) {
            self.observe(&mut counts, row.borrow());
        }

        counter!("caresense_rows_total").increment(counts.rows_seen);
        counter!("caresense_rows_skipped_total").increment(counts.rows_skipped);
        counter!("caresense_negative_rows_total").increment(negatives(&counts));
        debug!(
            rows = counts.rows_seen,
            skipped = counts.rows_skipped,
            cap = ?self.options.row_cap,
            "fold finished"
        );
        counts
    }

    pub fn snapshot(&self, counts: &MetricCounts) -> MetricsSnapshot {
        counts.snapshot(self.options.top_regions, self.options.top_terms)
    }

    pub fn aggregate<I>(&self, rows: I) -> MetricsSnapshot
    where
        I: IntoIterator,
        I::Item: Borrow<ReviewRecord>,
    {
        let counts = self.fold(rows);
        info!(
            rows = counts.rows_seen,
            labeled = counts.rows_labeled(),
            negative = negatives(&counts),
            "aggregation complete"
        );
        self.snapshot(&counts)
    }

    /// Fold disjoint partitions on the rayon pool and merge the partials.
    /// `row_cap` applies per partition.
    pub fn fold_partitions<P>(&self, partitions: &[P]) -> MetricCounts
    where
        P: AsRef<[ReviewRecord]> + Sync,
    {
        partitions
            .par_iter()
            .map(|p| self.fold(p.as_ref()))
            .reduce(MetricCounts::default, MetricCounts::merged)
    }

    pub fn aggregate_partitions<P>(&self, partitions: &[P]) -> MetricsSnapshot
    where
        P: AsRef<[ReviewRecord]> + Sync,
    {
        let counts = self.fold_partitions(partitions);
        info!(
            partitions = partitions.len(),
            rows = counts.rows_seen,
            negative = negatives(&counts),
            "partitioned aggregation complete"
        );
        self.snapshot(&counts)
    }
}

fn negatives(counts: &MetricCounts) -> u64 {
    counts
        .label_counts
        .get(&Label::Negative)
        .copied()
        .unwrap_or(0)
}
