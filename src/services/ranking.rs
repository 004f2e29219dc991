//! Threshold-or-top-N ranking.
//!
//! The published list is the union of "score clears the threshold" and "rank
//! is within the first `min_count`". Because the list is sorted descending,
//! that union is always a prefix of the sorted input.

/// Inclusion policy for a ranked list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankPolicy {
    /// Items scoring at least this much are always included.
    pub threshold: f64,
    /// The best `min_count` items are included regardless of score.
    pub min_count: usize,
}

/// Sort `items` by score (descending, stable on ties) and keep those that
/// clear `policy.threshold` or rank within the top `policy.min_count`.
pub fn rank_by_score<T>(mut items: Vec<(T, f64)>, policy: &RankPolicy) -> Vec<(T, f64)> {
    // sort_by is stable, so equal scores keep input order
    items.sort_by(|a, b| b.1.total_cmp(&a.1));

    items
        .into_iter()
        .enumerate()
        .filter(|(rank, (_, score))| *score >= policy.threshold || *rank < policy.min_count)
        .map(|(_, item)| item)
        .collect()
}
