// src/aggregate/topk.rs
use std::cmp::Reverse;

/// Highest-count entries first, ties by ascending key, at most `k` of them.
///
/// Takes map-like entries, so keys are already unique.
pub fn top_k<'a, K, I>(entries: I, k: usize) -> Vec<(K, u64)>
where
    K: Ord + Clone + 'a,
    I: IntoIterator<Item = (&'a K, &'a u64)>,
{
    if k == 0 {
        return Vec::new();
    }
    let mut all: Vec<(K, u64)> = entries
        .into_iter()
        .map(|(key, &count)| (key.clone(), count))
        .collect();
    all.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
    all.truncate(k);
    all
}
