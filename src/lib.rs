//! `upi-insights` loads a UPI payment-transaction dataset into memory once and answers a fixed
//! set of aggregation queries over it.
//!
//! The primary entrypoint is [`engine::InsightEngine`], built either from an already loaded
//! [`store::RowStore`] or from an [`config::EngineConfig`] (see [`config::EngineConfig::from_env`]).
//!
//! ## What you can load
//!
//! **File formats (auto-detected by extension):**
//!
//! - **Delimited text**: `.csv`, `.txt`, `.tsv` (tab-delimited)
//! - **JSON**: `.json` (array-of-objects) and `.ndjson` (newline-delimited objects)
//! - **Parquet**: `.parquet`, `.pq`
//!
//! Header names are normalized (trimmed, spaces to underscores, parentheses removed,
//! lowercased), so `Amount (INR)` is read as `amount_inr`. Cells are kept as raw text and
//! interpreted at query time by the helpers in [`coerce`]; empty cells are absent.
//!
//! ## Queries
//!
//! - [`engine::InsightEngine::get_summary`]: totals, date range, distinct states and banks
//! - [`engine::InsightEngine::get_failure_analysis`]: where failures concentrate, optionally at
//!   peak hours
//! - [`engine::InsightEngine::get_success_rate_by_segment`]: success by age group and device
//! - [`engine::InsightEngine::get_regional_analysis`]: state stats, worst state/bank corridors
//! - [`engine::InsightEngine::get_transaction_trends`]: hourly, daily and per-type amounts
//!
//! ```no_run
//! use upi_insights::config::EngineConfig;
//! use upi_insights::engine::InsightEngine;
//!
//! # fn main() -> Result<(), upi_insights::EngineError> {
//! let engine = InsightEngine::from_config(&EngineConfig::from_env()?)?;
//! let failures = engine.get_failure_analysis(true);
//! println!("peak failure rate: {}%", failures.failure_rate);
//! # Ok(())
//! # }
//! ```
//!
//! Reports can also be computed straight from a store:
//!
//! ```rust
//! use upi_insights::analysis::summarize;
//! use upi_insights::store::RowStore;
//! use upi_insights::types::{Column, Row};
//!
//! let store = RowStore::new(vec![
//!     Row::new().with(Column::TransactionStatus, "SUCCESS").with(Column::SenderState, "Goa"),
//!     Row::new().with(Column::TransactionStatus, "FAILED").with(Column::SenderState, "Goa"),
//! ]);
//! let summary = summarize(&store);
//! assert_eq!(summary.success_rate, 50.0);
//! assert_eq!(summary.states, 1);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified loading entrypoints and format-specific loaders
//! - [`store`]: the immutable row store and its load-once accessor
//! - [`types`]: recognized columns and the row record
//! - [`coerce`]: raw-cell interpretation with defined fallbacks
//! - [`execution`]: chunked parallel row selection with metrics
//! - [`analysis`]: the report queries
//! - [`context`]: question classification and report bundling
//! - [`config`], [`engine`], [`error`]

pub mod analysis;
pub mod coerce;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod store;
pub mod types;

pub use error::{ConfigError, EngineError, ExecutionError, LoadError, LoadResult};
