//! Per-group accumulators.

use crate::coerce::{is_success, percentage, to_number};
use crate::types::{Column, Row};

/// Counts how many of the recorded rows satisfied a condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateCounter {
    pub total: usize,
    pub hits: usize,
}

impl RateCounter {
    pub fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.hits += 1;
        }
    }

    /// Hit rate as a percentage rounded to two decimals; `0.0` when nothing was recorded.
    pub fn rate(&self) -> f64 {
        percentage(self.hits, self.total)
    }
}

/// Count, sum, min and max of a numeric column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmountStats {
    pub count: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountStats {
    pub fn record(&mut self, amount: f64) {
        self.count += 1;
        self.sum += amount;
        self.min = Some(self.min.map_or(amount, |m| m.min(amount)));
        self.max = Some(self.max.map_or(amount, |m| m.max(amount)));
    }

    /// Arithmetic mean; `0.0` when nothing was recorded.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Amount statistics plus success rate, the common shape of per-group transaction stats.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupStats {
    pub amounts: AmountStats,
    pub success: RateCounter,
}

impl GroupStats {
    /// Fold one row in. Unparseable amounts count as `0.0`.
    pub fn record(&mut self, row: &Row) {
        self.amounts.record(to_number(row.get(Column::AmountInr), 0.0));
        self.success.record(is_success(row.get(Column::TransactionStatus)));
    }

    pub fn count(&self) -> usize {
        self.success.total
    }
}
