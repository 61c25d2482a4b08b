//! Occurrence counting helpers.

use crate::snapshot::{DimensionHistogram, HistogramEntry};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Most common value in `values`.
///
/// Ties resolve to the value encountered first in input order, the same
/// result as a linear scan that only replaces its best on a strictly greater
/// count. Returns None for an empty slice.
pub fn most_frequent<T: Eq + Hash>(values: &[T]) -> Option<&T> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(&T, usize)> = None;
    for value in values {
        let count = counts[value];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Unique values sorted ascending, each with its occurrence count.
pub fn histogram<'a, I>(values: I) -> DimensionHistogram
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    DimensionHistogram::new(
        counts
            .into_iter()
            .map(|(value, count)| HistogramEntry {
                value: value.to_string(),
                count,
            })
            .collect(),
    )
}
