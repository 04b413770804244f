//! Failure breakdowns.

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::{is_failure, percentage};
use crate::execution::ExecutionEngine;
use crate::store::RowStore;
use crate::types::{Column, Row};

use super::filter::RowFilter;
use super::group::{count_present, top_n_by_count};

/// Transaction type whose failures are broken down by merchant category.
pub const P2M: &str = "P2M";

/// How many banks the failure ranking keeps.
pub const TOP_FAILING_BANKS: usize = 5;

/// Where failures concentrate, optionally restricted to peak hours.
///
/// Breakdown maps only hold values that occurred; absent cells are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub total_transactions: usize,
    pub total_failures: usize,
    pub failure_rate: f64,
    pub by_network: IndexMap<String, usize>,
    pub by_device: IndexMap<String, usize>,
    /// Top failing banks, most failures first.
    pub by_bank: IndexMap<String, usize>,
    /// Failed P2M transactions per merchant category.
    pub by_merchant_category: IndexMap<String, usize>,
    pub peak_only: bool,
}

pub fn analyze_failures(store: &RowStore, exec: &ExecutionEngine, peak_only: bool) -> FailureReport {
    let population = RowFilter::new()
        .peak_hours_only(peak_only)
        .apply(store.rows(), exec);
    let failed: Vec<&Row> = population
        .iter()
        .copied()
        .filter(|r| is_failure(r.get(Column::TransactionStatus)))
        .collect();

    let by_network = count_present(failed.iter().copied(), |r| r.get(Column::NetworkType));
    let by_device = count_present(failed.iter().copied(), |r| r.get(Column::DeviceType));
    let by_bank = top_n_by_count(
        count_present(failed.iter().copied(), |r| r.get(Column::SenderBank)),
        TOP_FAILING_BANKS,
    );
    let by_merchant_category = count_present(
        failed
            .iter()
            .copied()
            .filter(|r| r.get(Column::TransactionType) == Some(P2M)),
        |r| r.get(Column::MerchantCategory),
    );

    tracing::debug!(
        peak_only,
        population = population.len(),
        failures = failed.len(),
        "failure analysis"
    );

    FailureReport {
        total_transactions: population.len(),
        total_failures: failed.len(),
        failure_rate: percentage(failed.len(), population.len()),
        by_network,
        by_device,
        by_bank,
        by_merchant_category,
        peak_only,
    }
}
