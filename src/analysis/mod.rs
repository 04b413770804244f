//! Read-only aggregation queries over a [`crate::store::RowStore`].
//!
//! Each query filters the store into a population (see [`filter::RowFilter`]), groups it with the
//! helpers in [`group`] and folds each group with the accumulators in [`reduce`]. Every report is
//! a plain `serde::Serialize` value and a pure function of the store contents and the query
//! arguments.
//!
//! Conventions shared by all reports:
//!
//! - percentages are in `[0, 100]` and rounded to two decimals
//! - an empty population yields `0.0` rates instead of dividing by zero
//! - map-shaped breakdowns keep first-encounter order

pub mod failures;
pub mod filter;
pub mod group;
pub mod reduce;
pub mod regions;
pub mod segments;
pub mod summary;
pub mod trends;

pub use failures::{analyze_failures, FailureReport};
pub use filter::{is_peak_hour, RowFilter, PEAK_HOURS};
pub use regions::{analyze_regions, CorridorRate, RegionFilters, RegionReport, StateStats};
pub use segments::{analyze_segments, SegmentFilters, SegmentRate, SegmentReport};
pub use summary::{summarize, DateRange, Summary};
pub use trends::{analyze_trends, AmountSummary, DayStats, HourStats, TrendReport};
