//! Group filtering for query records.
//!
//! Matching is forgiving about presentation: groups are compared after
//! collapsing internal whitespace, trimming, and lowercasing, so
//! `"Shortest Paths"` and `" shortest   paths "` name the same group.

use std::collections::HashSet;

/// Normalize a group label for comparison.
pub fn normalize_group(group: &str) -> String {
    group
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Build an inclusion set from caller-supplied values.
///
/// Each value may itself carry comma-separated sub-values; all are
/// normalized and unioned. Blank values are dropped.
pub fn build_inclusion_set<S: AsRef<str>>(values: &[S]) -> HashSet<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(normalize_group)
        .filter(|g| !g.is_empty())
        .collect()
}

/// Decide whether a record with the given group passes the filter.
///
/// An empty inclusion set admits everything. A record whose group
/// normalizes to empty cannot match an explicit set and is rejected.
pub fn admit(record_group: &str, inclusion_set: &HashSet<String>) -> bool {
    if inclusion_set.is_empty() {
        return true;
    }
    let normalized = normalize_group(record_group);
    if normalized.is_empty() {
        return false;
    }
    inclusion_set.contains(&normalized)
}
