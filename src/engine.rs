//! The query surface handed to callers: one loaded store plus the engine that scans it.

use std::sync::Arc;

use crate::analysis::{
    analyze_failures, analyze_regions, analyze_segments, analyze_trends, summarize, FailureReport,
    RegionReport, SegmentReport, Summary, TrendReport,
};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::execution::ExecutionEngine;
use crate::store::RowStore;

/// Answers every report query against a single immutable [`RowStore`].
///
/// The store is shared behind an [`Arc`], so several engines (each with its own execution
/// pool) can answer from one loaded copy. Share an engine itself by wrapping it in an `Arc`.
#[derive(Debug)]
pub struct InsightEngine {
    store: Arc<RowStore>,
    exec: ExecutionEngine,
}

impl InsightEngine {
    pub fn new(store: Arc<RowStore>, exec: ExecutionEngine) -> Self {
        Self { store, exec }
    }

    /// Build the execution engine and load the store described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let exec = ExecutionEngine::new(config.execution.clone())?;
        let store = RowStore::load(&config.data_path, &config.load)?;
        tracing::info!(
            path = %config.data_path.display(),
            rows = store.len(),
            "insight engine ready"
        );
        Ok(Self::new(Arc::new(store), exec))
    }

    pub fn store(&self) -> &Arc<RowStore> {
        &self.store
    }

    pub fn execution(&self) -> &ExecutionEngine {
        &self.exec
    }

    pub fn get_summary(&self) -> Summary {
        summarize(&self.store)
    }

    pub fn get_failure_analysis(&self, peak_only: bool) -> FailureReport {
        analyze_failures(&self.store, &self.exec, peak_only)
    }

    pub fn get_success_rate_by_segment(
        &self,
        transaction_type: Option<&str>,
        min_amount: Option<f64>,
    ) -> SegmentReport {
        analyze_segments(&self.store, &self.exec, transaction_type, min_amount)
    }

    pub fn get_regional_analysis(
        &self,
        transaction_type: Option<&str>,
        weekend_only: bool,
    ) -> RegionReport {
        analyze_regions(&self.store, &self.exec, transaction_type, weekend_only)
    }

    pub fn get_transaction_trends(&self) -> TrendReport {
        analyze_trends(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::InsightEngine;
    use crate::config::EngineConfig;
    use crate::error::{EngineError, LoadError};
    use crate::execution::ExecutionEngine;
    use crate::store::RowStore;
    use crate::types::{Column, Row};

    fn three_rows() -> InsightEngine {
        let store = RowStore::new(vec![
            Row::new()
                .with(Column::TransactionStatus, "SUCCESS")
                .with(Column::AmountInr, "100")
                .with(Column::SenderState, "Maharashtra"),
            Row::new()
                .with(Column::TransactionStatus, "FAILED")
                .with(Column::AmountInr, "200")
                .with(Column::SenderState, "Maharashtra")
                .with(Column::NetworkType, "4G"),
            Row::new()
                .with(Column::TransactionStatus, "SUCCESS")
                .with(Column::AmountInr, "300")
                .with(Column::SenderState, "Kerala"),
        ]);
        InsightEngine::new(Arc::new(store), ExecutionEngine::default())
    }

    #[test]
    fn summary_and_failures_agree_on_three_rows() {
        let engine = three_rows();

        let summary = engine.get_summary();
        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.success_rate, 66.67);
        assert_eq!(summary.states, 2);

        let failures = engine.get_failure_analysis(false);
        assert_eq!(failures.total_failures, 1);
        assert_eq!(failures.failure_rate, 33.33);
        assert_eq!(failures.by_network.len(), 1);
        assert_eq!(failures.by_network["4G"], 1);
    }

    #[test]
    fn min_amount_filters_segments() {
        let engine = three_rows();
        let report = engine.get_success_rate_by_segment(None, Some(250.0));
        assert_eq!(report.sample_size, 1);
        assert_eq!(report.top_segments_by_success[0].success_rate, 100.0);
    }

    #[test]
    fn regional_and_trend_queries_read_the_same_store() {
        let engine = three_rows();
        let regions = engine.get_regional_analysis(None, false);
        assert_eq!(regions.sample_size, 3);
        assert_eq!(regions.by_state[0].sender_state, "Maharashtra");

        let trends = engine.get_transaction_trends();
        assert!(trends.by_hour.is_empty());
        assert_eq!(trends.amount_stats_by_type["Unknown"].count, 3);
    }

    #[test]
    fn from_config_surfaces_load_errors() {
        let cfg = EngineConfig {
            data_path: "does/not/exist.csv".into(),
            ..EngineConfig::default()
        };
        let err = InsightEngine::from_config(&cfg).unwrap_err();
        assert!(matches!(err, EngineError::Load(LoadError::Io(_))));
    }
}
