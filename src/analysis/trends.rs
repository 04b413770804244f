//! Time-of-day, day-of-week and per-type amount trends over the whole store.

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::{parse_hour, round2, to_number};
use crate::store::RowStore;
use crate::types::Column;

use super::group::{group_by, or_unknown};
use super::reduce::{AmountStats, GroupStats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourStats {
    pub hour_of_day: u32,
    pub count: usize,
    pub avg_amount: f64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStats {
    pub day_of_week: String,
    pub count: usize,
    pub avg_amount: f64,
}

/// Descriptive amount statistics, each rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl From<&AmountStats> for AmountSummary {
    fn from(s: &AmountStats) -> Self {
        Self {
            count: s.count,
            mean: round2(s.mean()),
            min: round2(s.min.unwrap_or(0.0)),
            max: round2(s.max.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    /// Ascending by hour; rows without a parseable hour are left out.
    pub by_hour: Vec<HourStats>,
    /// In the order days were first seen.
    pub by_day_of_week: Vec<DayStats>,
    pub amount_stats_by_type: IndexMap<String, AmountSummary>,
}

pub fn analyze_trends(store: &RowStore) -> TrendReport {
    let rows = store.rows();

    let mut by_hour: Vec<HourStats> = group_by(
        rows,
        |r| parse_hour(r.get(Column::HourOfDay)),
        |g: &mut GroupStats, r| g.record(r),
    )
    .into_iter()
    .map(|(hour_of_day, g)| HourStats {
        hour_of_day,
        count: g.count(),
        avg_amount: g.amounts.mean(),
        success_rate: g.success.rate(),
    })
    .collect();
    by_hour.sort_by_key(|h| h.hour_of_day);

    let by_day_of_week = group_by(
        rows,
        |r| r.get(Column::DayOfWeek).map(str::to_owned),
        |s: &mut AmountStats, r| s.record(to_number(r.get(Column::AmountInr), 0.0)),
    )
    .into_iter()
    .map(|(day_of_week, s)| DayStats {
        day_of_week,
        count: s.count,
        avg_amount: s.mean(),
    })
    .collect();

    let amount_stats_by_type = group_by(
        rows,
        |r| Some(or_unknown(r.get(Column::TransactionType)).to_owned()),
        |s: &mut AmountStats, r| s.record(to_number(r.get(Column::AmountInr), 0.0)),
    )
    .into_iter()
    .map(|(t, s)| (t, AmountSummary::from(&s)))
    .collect();

    tracing::debug!(rows = rows.len(), "trend analysis");

    TrendReport {
        by_hour,
        by_day_of_week,
        amount_stats_by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::analyze_trends;
    use crate::store::RowStore;
    use crate::types::{Column, Row};

    fn txn(hour: &str, day: &str, kind: &str, amount: &str, status: &str) -> Row {
        let mut row = Row::new()
            .with(Column::TransactionType, kind)
            .with(Column::AmountInr, amount)
            .with(Column::TransactionStatus, status);
        row.set(Column::HourOfDay, Some(hour.to_string()));
        row.set(Column::DayOfWeek, Some(day.to_string()));
        row
    }

    #[test]
    fn hours_sort_ascending_and_skip_missing() {
        let store = RowStore::new(vec![
            txn("21", "Monday", "P2P", "100", "SUCCESS"),
            txn("3", "Monday", "P2P", "50", "FAILED"),
            txn("21", "Tuesday", "P2P", "300", "FAILED"),
            txn("", "Tuesday", "P2P", "10", "SUCCESS"),
        ]);
        let report = analyze_trends(&store);

        let hours: Vec<u32> = report.by_hour.iter().map(|h| h.hour_of_day).collect();
        assert_eq!(hours, vec![3, 21]);
        assert_eq!(report.by_hour[1].count, 2);
        assert_eq!(report.by_hour[1].avg_amount, 200.0);
        assert_eq!(report.by_hour[1].success_rate, 50.0);
    }

    #[test]
    fn amount_stats_round_three_decimal_amounts_down() {
        let store = RowStore::new(vec![txn("9", "Monday", "P2M", "1.115", "SUCCESS")]);
        let stats = &analyze_trends(&store).amount_stats_by_type["P2M"];
        assert_eq!((stats.mean, stats.min, stats.max), (1.11, 1.11, 1.11));
    }

    #[test]
    fn days_keep_first_seen_order() {
        let store = RowStore::new(vec![
            txn("1", "Sunday", "P2P", "10", "SUCCESS"),
            txn("1", "Monday", "P2P", "20", "SUCCESS"),
            txn("1", "Sunday", "P2P", "30", "SUCCESS"),
            txn("1", "", "P2P", "30", "SUCCESS"),
        ]);
        let report = analyze_trends(&store);

        let days: Vec<(&str, usize, f64)> = report
            .by_day_of_week
            .iter()
            .map(|d| (d.day_of_week.as_str(), d.count, d.avg_amount))
            .collect();
        assert_eq!(days, vec![("Sunday", 2, 20.0), ("Monday", 1, 20.0)]);
    }

    #[test]
    fn amount_stats_round_and_bin_unknown_types() {
        let mut untyped = txn("1", "Monday", "x", "7.005", "SUCCESS");
        untyped.set(Column::TransactionType, None);
        let store = RowStore::new(vec![
            txn("1", "Monday", "Recharge", "10.126", "SUCCESS"),
            txn("1", "Monday", "Recharge", "20.5", "SUCCESS"),
            untyped,
        ]);
        let report = analyze_trends(&store);

        let recharge = &report.amount_stats_by_type["Recharge"];
        assert_eq!(recharge.count, 2);
        assert_eq!(recharge.min, 10.13);
        assert_eq!(recharge.max, 20.5);
        assert_eq!(recharge.mean, 15.31);
        assert_eq!(report.amount_stats_by_type["Unknown"].count, 1);
    }
}
