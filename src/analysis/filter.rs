//! Population filters shared by the query operations.

use std::ops::RangeInclusive;

use crate::coerce::{is_truthy_flag, parse_hour, to_number};
use crate::execution::ExecutionEngine;
use crate::types::{Column, Row};

/// Hours of day (inclusive) considered peak traffic.
pub const PEAK_HOURS: RangeInclusive<u32> = 18..=22;

/// `true` if the row's hour_of_day parses into [`PEAK_HOURS`].
pub fn is_peak_hour(row: &Row) -> bool {
    parse_hour(row.get(Column::HourOfDay)).is_some_and(|h| PEAK_HOURS.contains(&h))
}

/// A conjunction of optional row predicates.
///
/// An empty `transaction_type` is treated the same as no type filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    pub transaction_type: Option<String>,
    pub min_amount: Option<f64>,
    pub weekend_only: bool,
    pub peak_hours_only: bool,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transaction_type(mut self, transaction_type: Option<&str>) -> Self {
        self.transaction_type = transaction_type
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        self
    }

    pub fn min_amount(mut self, min_amount: Option<f64>) -> Self {
        self.min_amount = min_amount;
        self
    }

    pub fn weekend_only(mut self, weekend_only: bool) -> Self {
        self.weekend_only = weekend_only;
        self
    }

    pub fn peak_hours_only(mut self, peak_hours_only: bool) -> Self {
        self.peak_hours_only = peak_hours_only;
        self
    }

    /// `true` when no predicate is active.
    pub fn is_unfiltered(&self) -> bool {
        self.transaction_type.is_none()
            && self.min_amount.is_none()
            && !self.weekend_only
            && !self.peak_hours_only
    }

    pub fn matches(&self, row: &Row) -> bool {
        if let Some(t) = self.transaction_type.as_deref() {
            if row.get(Column::TransactionType) != Some(t) {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if to_number(row.get(Column::AmountInr), 0.0) < min {
                return false;
            }
        }
        if self.weekend_only && !is_truthy_flag(row.get(Column::IsWeekend)) {
            return false;
        }
        if self.peak_hours_only && !is_peak_hour(row) {
            return false;
        }
        true
    }

    /// Select the matching rows in source order.
    pub fn apply<'a>(&self, rows: &'a [Row], exec: &ExecutionEngine) -> Vec<&'a Row> {
        if self.is_unfiltered() {
            return rows.iter().collect();
        }
        exec.select(rows, |row| self.matches(row))
    }
}
