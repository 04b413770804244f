//! Row-store loading.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - auto-detects the source format by file extension (or you can force it via [`LoadOptions`])
//! - normalizes header names and checks the required columns
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`parquet`]

pub mod csv;
pub mod header;
pub mod json;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use header::ColumnMap;
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    TracingObserver,
};
pub use unified::{load_from_path, LoadOptions, LoadRequest, SourceFormat};
