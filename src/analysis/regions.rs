//! Regional comparisons: per-state stats, worst state/bank corridors, network mix by state.

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::is_success;
use crate::execution::ExecutionEngine;
use crate::store::RowStore;
use crate::types::{Column, Row};

use super::filter::RowFilter;
use super::group::{group_by, or_unknown};
use super::reduce::{GroupStats, RateCounter};

/// How many corridors the worst-performer list keeps.
pub const WORST_CORRIDORS: usize = 5;

/// Filters echoed back in a [`RegionReport`], exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionFilters {
    pub transaction_type: Option<String>,
    pub weekend_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateStats {
    pub sender_state: String,
    pub total_transactions: usize,
    pub avg_amount: f64,
    pub success_rate: f64,
}

/// Success rate of one (state, bank) corridor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorRate {
    pub state: String,
    pub bank: String,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub filters: RegionFilters,
    pub sample_size: usize,
    /// Busiest states first.
    pub by_state: Vec<StateStats>,
    /// Lowest success rates first.
    pub worst_state_bank_combinations: Vec<CorridorRate>,
    /// network type -> sender state -> transaction count.
    pub network_by_state: IndexMap<String, IndexMap<String, usize>>,
}

pub fn analyze_regions(
    store: &RowStore,
    exec: &ExecutionEngine,
    transaction_type: Option<&str>,
    weekend_only: bool,
) -> RegionReport {
    let population = RowFilter::new()
        .transaction_type(transaction_type)
        .weekend_only(weekend_only)
        .apply(store.rows(), exec);

    let mut by_state: Vec<StateStats> = group_by(
        population.iter().copied(),
        |r| Some(state_of(r).to_owned()),
        |g: &mut GroupStats, r| g.record(r),
    )
    .into_iter()
    .map(|(sender_state, g)| StateStats {
        sender_state,
        total_transactions: g.count(),
        avg_amount: g.amounts.mean(),
        success_rate: g.success.rate(),
    })
    .collect();
    by_state.sort_by(|a, b| b.total_transactions.cmp(&a.total_transactions));

    let mut worst: Vec<CorridorRate> = group_by(
        population.iter().copied(),
        |r| {
            Some((
                state_of(r).to_owned(),
                or_unknown(r.get(Column::SenderBank)).to_owned(),
            ))
        },
        |c: &mut RateCounter, r| c.record(is_success(r.get(Column::TransactionStatus))),
    )
    .into_iter()
    .map(|((state, bank), c)| CorridorRate {
        state,
        bank,
        success_rate: c.rate(),
    })
    .collect();
    worst.sort_by(|a, b| a.success_rate.total_cmp(&b.success_rate));
    worst.truncate(WORST_CORRIDORS);

    let mut network_by_state: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();
    for r in &population {
        let network = or_unknown(r.get(Column::NetworkType)).to_owned();
        *network_by_state
            .entry(network)
            .or_default()
            .entry(state_of(r).to_owned())
            .or_default() += 1;
    }

    tracing::debug!(
        ?transaction_type,
        weekend_only,
        sample_size = population.len(),
        "regional analysis"
    );

    RegionReport {
        filters: RegionFilters {
            transaction_type: transaction_type.map(str::to_owned),
            weekend_only,
        },
        sample_size: population.len(),
        by_state,
        worst_state_bank_combinations: worst,
        network_by_state,
    }
}

fn state_of(row: &Row) -> &str {
    or_unknown(row.get(Column::SenderState))
}
