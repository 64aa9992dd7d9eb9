use std::collections::BTreeMap;

use crate::{db::RecordStore, models::YearCount};

/// Counts movies per release year, ascending by year
///
/// Movies without a parseable year are left out.
pub fn release_year_counts(store: &RecordStore) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in store.iter().filter_map(|m| m.release_year) {
        *counts.entry(year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}
