//! Success rates by customer segment and merchant.

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::{is_success, is_truthy_flag};
use crate::execution::ExecutionEngine;
use crate::store::RowStore;
use crate::types::{Column, Row};

use super::filter::RowFilter;
use super::group::{group_by, or_unknown};
use super::reduce::RateCounter;

/// How many segments the success ranking keeps.
pub const TOP_SEGMENTS: usize = 5;

/// Filters echoed back in a [`SegmentReport`], exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentFilters {
    pub transaction_type: Option<String>,
    pub min_amount: Option<f64>,
}

/// Success rate of one (age group, device type) segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRate {
    pub age_group: String,
    pub device_type: String,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    pub filters: SegmentFilters,
    pub sample_size: usize,
    /// Best segments first; equal rates keep the order segments were first seen.
    pub top_segments_by_success: Vec<SegmentRate>,
    pub success_by_merchant: IndexMap<String, f64>,
    pub fraud_flag_rate: f64,
}

pub fn analyze_segments(
    store: &RowStore,
    exec: &ExecutionEngine,
    transaction_type: Option<&str>,
    min_amount: Option<f64>,
) -> SegmentReport {
    let population = RowFilter::new()
        .transaction_type(transaction_type)
        .min_amount(min_amount)
        .apply(store.rows(), exec);

    let segments = group_by(
        population.iter().copied(),
        |r: &Row| {
            Some((
                or_unknown(r.get(Column::SenderAgeGroup)).to_owned(),
                or_unknown(r.get(Column::DeviceType)).to_owned(),
            ))
        },
        |c: &mut RateCounter, r| c.record(is_success(r.get(Column::TransactionStatus))),
    );
    let mut ranked: Vec<SegmentRate> = segments
        .into_iter()
        .map(|((age_group, device_type), c)| SegmentRate {
            age_group,
            device_type,
            success_rate: c.rate(),
        })
        .collect();
    ranked.sort_by(|a, b| b.success_rate.total_cmp(&a.success_rate));
    ranked.truncate(TOP_SEGMENTS);

    let success_by_merchant = group_by(
        population.iter().copied(),
        |r| r.get(Column::MerchantCategory).map(str::to_owned),
        |c: &mut RateCounter, r| c.record(is_success(r.get(Column::TransactionStatus))),
    )
    .into_iter()
    .map(|(merchant, c)| (merchant, c.rate()))
    .collect();

    let mut fraud = RateCounter::default();
    for r in &population {
        fraud.record(is_truthy_flag(r.get(Column::FraudFlag)));
    }

    tracing::debug!(
        ?transaction_type,
        ?min_amount,
        sample_size = population.len(),
        "segment analysis"
    );

    SegmentReport {
        filters: SegmentFilters {
            transaction_type: transaction_type.map(str::to_owned),
            min_amount,
        },
        sample_size: population.len(),
        top_segments_by_success: ranked,
        success_by_merchant,
        fraud_flag_rate: fraud.rate(),
    }
}
