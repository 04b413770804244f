//! Unified load entrypoint.
//!
//! Most callers should use [`load_from_path`], which reads a source file into rows.
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{LoadError, LoadResult};
use crate::types::{Column, Row};

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json, parquet};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row (CSV, TSV).
    Delimited,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Apache Parquet.
    Parquet,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Delimited),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// Lowercase name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Delimited => "delimited",
            Self::Json => "json",
            Self::Parquet => "parquet",
        }
    }
}

impl FromStr for SourceFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "delimited" => Ok(Self::Delimited),
            other => Self::from_extension(other).ok_or_else(|| LoadError::SchemaMismatch {
                message: format!("unsupported source format '{s}'"),
            }),
        }
    }
}

/// Options controlling how the row store is loaded.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<SourceFormat>,
    /// Field delimiter for delimited sources. If `None`, `\t` for `.tsv` files and `,` otherwise.
    pub delimiter: Option<u8>,
    /// Columns the source must provide (after normalization).
    pub required_columns: Vec<Column>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("delimiter", &self.delimiter.map(char::from))
            .field("required_columns", &self.required_columns)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: None,
            required_columns: Column::ALL.to_vec(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a source file into rows, preserving source order.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count and elapsed time
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use upi_insights::ingestion::{load_from_path, LoadOptions, TracingObserver};
///
/// # fn main() -> Result<(), upi_insights::LoadError> {
/// let opts = LoadOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let rows = load_from_path("data/upi_transactions_2024.csv", &opts)?;
/// println!("rows={}", rows.len());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Vec<Row>> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let start = Instant::now();
    let required = options.required_columns.as_slice();
    let result = match fmt {
        SourceFormat::Delimited => {
            csv::load_csv_from_path(path, delimiter_for(path, options), required)
        }
        SourceFormat::Json => json::load_json_from_path(path, required),
        SourceFormat::Parquet => parquet::load_parquet_from_path(path, required),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(rows) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: rows.len(),
                    elapsed: start.elapsed(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn delimiter_for(path: &Path, options: &LoadOptions) -> u8 {
    options.delimiter.unwrap_or_else(|| {
        let is_tsv = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
        if is_tsv { b'\t' } else { b',' }
    })
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::Parquet(err) => {
            // Parquet errors often wrap IO, but not always in a structured way.
            if error_chain_contains_io(err) {
                LoadSeverity::Critical
            } else {
                LoadSeverity::Error
            }
        }
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        LoadError::SchemaMismatch { .. } => LoadSeverity::Error,
        LoadError::ParseError { .. } => LoadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn infer_format_from_path(path: &Path) -> LoadResult<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LoadError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    SourceFormat::from_extension(ext).ok_or_else(|| LoadError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// An owned load request: a source path plus the options to read it with.
///
/// [`crate::store::LazyRowStore`] keeps one of these and runs it on first access.
#[derive(Clone)]
pub struct LoadRequest {
    /// Path to the source file.
    pub path: PathBuf,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl LoadRequest {
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Execute the request by calling [`load_from_path`].
    pub fn run(&self) -> LoadResult<Vec<Row>> {
        load_from_path(&self.path, &self.options)
    }
}
