//! Insertion-ordered grouping helpers.
//!
//! Groups are kept in an [`IndexMap`], so iteration follows first-encounter order. Stable sorts
//! over that order give the tie-breaking the reports rely on.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::types::Row;

/// Label used for grouping keys whose cell is absent.
pub const UNKNOWN: &str = "Unknown";

/// The cell text, or [`UNKNOWN`] when absent.
pub fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

/// Group `rows` by `key`, folding each row into its group's accumulator with `update`.
///
/// Rows for which `key` returns `None` are skipped.
pub fn group_by<'a, I, K, A, FK, FU>(rows: I, mut key: FK, mut update: FU) -> IndexMap<K, A>
where
    I: IntoIterator<Item = &'a Row>,
    K: Hash + Eq,
    A: Default,
    FK: FnMut(&'a Row) -> Option<K>,
    FU: FnMut(&mut A, &'a Row),
{
    let mut groups: IndexMap<K, A> = IndexMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            update(groups.entry(k).or_default(), row);
        }
    }
    groups
}

/// Count rows per present value of `key`; absent values are not counted.
pub fn count_present<'a, I, F>(rows: I, key: F) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a Row>,
    F: Fn(&'a Row) -> Option<&'a str>,
{
    group_by(rows, |r| key(r).map(str::to_owned), |n: &mut usize, _| *n += 1)
}

/// The `n` largest counts, descending; equal counts keep their first-encounter order.
pub fn top_n_by_count(counts: IndexMap<String, usize>, n: usize) -> IndexMap<String, usize> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().take(n).collect()
}
