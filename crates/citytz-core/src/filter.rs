// crates/citytz-core/src/filter.rs

//! Post-query narrowing of result sets.
//!
//! These operate on results already returned by the engine, so they take and
//! return owned vectors and never touch the dataset.

use crate::model::Record;

fn contains_folded(haystack: &str, fragment: &str) -> bool {
    haystack.to_lowercase().contains(&fragment.to_lowercase())
}

/// Keeps records whose timezone contains `fragment` (case-insensitive).
///
/// An empty fragment keeps everything.
pub fn filter_by_timezone(records: Vec<Record>, fragment: &str) -> Vec<Record> {
    if fragment.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| contains_folded(&r.timezone, fragment))
        .collect()
}

/// Keeps records whose country name contains `fragment` (case-insensitive).
pub fn filter_by_country(records: Vec<Record>, fragment: &str) -> Vec<Record> {
    if fragment.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| contains_folded(&r.country, fragment))
        .collect()
}

/// Truncates to `n` records. `0` means no limit.
pub fn limit(mut records: Vec<Record>, n: usize) -> Vec<Record> {
    if n > 0 {
        records.truncate(n);
    }
    records
}
