//! Whole-dataset descriptive statistics.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::{is_success, percentage, round2, to_number};
use crate::store::RowStore;
use crate::types::Column;

/// Rupees per crore.
pub const CRORE: f64 = 10_000_000.0;

/// Lexical bounds of the non-empty timestamps; both `None` when there are none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_transactions: usize,
    pub date_range: DateRange,
    pub transaction_types: IndexMap<String, usize>,
    pub success_rate: f64,
    pub total_amount_crores: f64,
    /// Distinct sender states.
    pub states: usize,
    /// Distinct sender banks.
    pub banks: usize,
}

pub fn summarize(store: &RowStore) -> Summary {
    let rows = store.rows();

    let mut date_range = DateRange::default();
    let mut transaction_types: IndexMap<String, usize> = IndexMap::new();
    let mut successes = 0usize;
    let mut total_amount = 0.0;
    let mut states: HashSet<&str> = HashSet::new();
    let mut banks: HashSet<&str> = HashSet::new();

    for row in rows {
        if let Some(ts) = row.get(Column::Timestamp) {
            if date_range.start.as_deref().is_none_or(|s| ts < s) {
                date_range.start = Some(ts.to_owned());
            }
            if date_range.end.as_deref().is_none_or(|e| ts > e) {
                date_range.end = Some(ts.to_owned());
            }
        }
        if let Some(kind) = row.get(Column::TransactionType) {
            *transaction_types.entry(kind.to_owned()).or_default() += 1;
        }
        if is_success(row.get(Column::TransactionStatus)) {
            successes += 1;
        }
        total_amount += to_number(row.get(Column::AmountInr), 0.0);
        if let Some(state) = row.get(Column::SenderState) {
            states.insert(state);
        }
        if let Some(bank) = row.get(Column::SenderBank) {
            banks.insert(bank);
        }
    }

    tracing::debug!(rows = rows.len(), "dataset summary");

    Summary {
        total_transactions: rows.len(),
        date_range,
        transaction_types,
        success_rate: percentage(successes, rows.len()),
        total_amount_crores: round2(total_amount / CRORE),
        states: states.len(),
        banks: banks.len(),
    }
}
