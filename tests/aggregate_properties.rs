// tests/aggregate_properties.rs
//
// Aggregator properties over seeded synthetic row sets.

use caresense::aggregate::top_k;
use caresense::{
    AggregateOptions, Aggregator, Analyzer, IssueCatalog, Label, Lexicon, MetricCounts,
    ReviewRecord,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::cell::Cell;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

const TEXTS: &[&str] = &[
    "The nurse was very friendly.",
    "Long wait, rude receptionist. Never again!",
    "Dirty waiting room and unexpected charges.",
    "Fine.",
    "Not good. Not bad either.",
    "",
    "   ",
    "Excellent care, slightly expensive.",
    "Horrible billing, awful delay, terrible attitude.",
    "Clean and efficient?",
];
const REGIONS: &[Option<&str>] = &[Some("TX"), Some("CA"), Some(" NY "), Some(""), None];
const RATINGS: &[Option<&str>] = &[Some("1"), Some("4.7"), Some("9"), Some("n/a"), None];
const PERIODS: &[&str] = &["2024-01", "2024-02", "Unknown"];
const LABELS: &[Option<&str>] = &[None, None, None, Some("negative"), Some("bogus")];

fn aggregator(options: AggregateOptions) -> Aggregator {
    Aggregator::new(
        Analyzer::with_lexicon(Arc::new(Lexicon::tiny())),
        IssueCatalog::default(),
        options,
    )
}

fn random_rows(rng: &mut StdRng, n: usize) -> Vec<ReviewRecord> {
    (0..n)
        .map(|_| {
            let mut r = ReviewRecord::new(TEXTS[rng.random_range(0..TEXTS.len())])
                .with_year_month(PERIODS[rng.random_range(0..PERIODS.len())]);
            if let Some(region) = REGIONS[rng.random_range(0..REGIONS.len())] {
                r = r.with_region(region);
            }
            if let Some(rating) = RATINGS[rng.random_range(0..RATINGS.len())] {
                r = r.with_rating(rating);
            }
            if let Some(label) = LABELS[rng.random_range(0..LABELS.len())] {
                r = r.with_label(label);
            }
            r
        })
        .collect()
}

#[test]
fn issues_by_region_sums_to_negative_count() {
    let agg = aggregator(AggregateOptions::default());
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let rows = random_rows(&mut rng, 60);
        let counts = agg.fold(&rows);
        let m = counts.label_counts.get(&Label::Negative).copied().unwrap_or(0);
        assert_eq!(counts.issues_by_region.values().sum::<u64>(), m);
        assert_eq!(
            counts.rows_labeled() + counts.rows_skipped,
            counts.rows_seen
        );
        assert_eq!(counts.rating_histogram.values().sum::<u64>(), counts.rows_labeled());
    }
}

#[test]
fn merge_law_holds_for_random_splits() {
    let opts = AggregateOptions {
        top_regions: 2,
        top_terms: 3,
        ..AggregateOptions::default()
    };
    let agg = aggregator(opts);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..25 {
        let rows = random_rows(&mut rng, 50);
        let (left, right): (Vec<_>, Vec<_>) =
            rows.iter().cloned().partition(|_| rng.random_bool(0.5));

        let merged = agg.fold(&left).merged(agg.fold(&right));
        assert_eq!(agg.snapshot(&merged), agg.aggregate(&rows));

        // and the other way around
        let merged_rev = agg.fold(&right).merged(agg.fold(&left));
        assert_eq!(merged, merged_rev);
    }
}

#[test]
fn parallel_partitions_match_sequential_fold() {
    let agg = aggregator(AggregateOptions::default());
    let mut rng = StdRng::seed_from_u64(3);
    let rows = random_rows(&mut rng, 400);

    let mut partitions: Vec<Vec<ReviewRecord>> = vec![Vec::new(); 7];
    for r in &rows {
        partitions[rng.random_range(0..7)].push(r.clone());
    }

    assert_eq!(agg.fold_partitions(&partitions), agg.fold(&rows));
    assert_eq!(agg.aggregate_partitions(&partitions), agg.aggregate(&rows));
    assert_eq!(
        agg.fold_partitions::<Vec<ReviewRecord>>(&[]),
        MetricCounts::default()
    );
}

#[test]
fn row_cap_stops_pulling_rows() {
    let agg = aggregator(AggregateOptions {
        row_cap: Some(5),
        ..AggregateOptions::default()
    });
    let pulled = Cell::new(0usize);
    // unbounded source; only the cap ends the fold
    let rows = (0..).map(|i: usize| {
        pulled.set(pulled.get() + 1);
        if i % 2 == 0 {
            ReviewRecord::new("")
        } else {
            ReviewRecord::new("rude staff").with_region("TX")
        }
    });
    let counts = agg.fold(rows);
    assert_eq!(pulled.get(), 5);
    assert_eq!(counts.rows_seen, 5);
    assert_eq!(counts.rows_skipped, 3);
    assert_eq!(counts.issues_by_region.get("TX"), Some(&2));
}

#[test]
fn top_k_is_bounded_sorted_and_unique() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let m: BTreeMap<String, u64> = (0..rng.random_range(0..30))
            .map(|_| {
                (
                    format!("k{}", rng.random_range(0..20)),
                    rng.random_range(1..6),
                )
            })
            .collect();
        let k = rng.random_range(0..12);
        let top = top_k(&m, k);

        assert!(top.len() <= k);
        assert_eq!(top.len(), k.min(m.len()));
        for pair in top.windows(2) {
            let a = (Reverse(pair[0].1), &pair[0].0);
            let b = (Reverse(pair[1].1), &pair[1].0);
            assert!(a < b, "{pair:?} out of order");
        }
        for (key, count) in &top {
            assert_eq!(m.get(key), Some(count));
        }
    }
}

#[test]
fn snapshot_carries_period_trend_and_ordered_ratings() {
    let agg = aggregator(AggregateOptions::default());
    let rows = vec![
        ReviewRecord::new("Great doctor.").with_year_month("2024-01").with_rating(5),
        ReviewRecord::new("Rude and dismissive.").with_year_month("2024-01").with_rating(1),
        ReviewRecord::new("Rude again.").with_year_month("2024-02"),
    ];
    let snap = agg.aggregate(&rows);

    let jan = &snap.labels_by_period["2024-01"];
    assert_eq!(jan.get(&Label::Positive), Some(&1));
    assert_eq!(jan.get(&Label::Negative), Some(&1));
    assert_eq!(snap.labels_by_period["2024-02"].get(&Label::Negative), Some(&1));
    assert_eq!(
        snap.rating_histogram_ordered(),
        vec![("1", 1), ("2", 0), ("3", 0), ("4", 0), ("5", 1), ("NA", 1)]
    );
    assert_eq!(snap.issue_buckets.get("staff"), Some(&2));
    assert_eq!(snap.issues_by_region_top, vec![("Unknown".to_string(), 2)]);
    assert_eq!(snap.negative_terms_top[0], ("rude".to_string(), 2));

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["label_counts"]["negative"], 2);
    assert_eq!(json["labels_by_period"]["2024-01"]["positive"], 1);
}
