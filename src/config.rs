//! Engine configuration, read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::execution::ExecutionOptions;
use crate::ingestion::{LoadOptions, SourceFormat};

/// Dataset location used when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/upi_transactions_2024.csv";

pub const ENV_DATA: &str = "UPI_INSIGHTS_DATA";
pub const ENV_FORMAT: &str = "UPI_INSIGHTS_FORMAT";
pub const ENV_DELIMITER: &str = "UPI_INSIGHTS_DELIMITER";
pub const ENV_THREADS: &str = "UPI_INSIGHTS_THREADS";
pub const ENV_CHUNK_SIZE: &str = "UPI_INSIGHTS_CHUNK_SIZE";

/// Everything needed to build an [`crate::engine::InsightEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub data_path: PathBuf,
    pub load: LoadOptions,
    pub execution: ExecutionOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            load: LoadOptions::default(),
            execution: ExecutionOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Build a config from the `UPI_INSIGHTS_*` environment variables; unset ones keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        // Whitespace is a meaningful delimiter, so only an empty value counts as unset.
        let get_raw = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(path) = get(ENV_DATA) {
            cfg.data_path = PathBuf::from(path);
        }
        if let Some(raw) = get(ENV_FORMAT) {
            let format = SourceFormat::from_str(raw.trim())
                .map_err(|e| invalid(ENV_FORMAT, &raw, e.to_string()))?;
            cfg.load.format = Some(format);
            cfg.load.delimiter = format_delimiter(&raw);
        }
        if let Some(raw) = get_raw(ENV_DELIMITER) {
            let delimiter = parse_delimiter(&raw).ok_or_else(|| {
                invalid(ENV_DELIMITER, &raw, "expected a single ASCII character".to_string())
            })?;
            cfg.load.delimiter = Some(delimiter);
        }
        if let Some(raw) = get(ENV_THREADS) {
            cfg.execution.num_threads = Some(parse_count(ENV_THREADS, &raw)?);
        }
        if let Some(raw) = get(ENV_CHUNK_SIZE) {
            cfg.execution.chunk_size = parse_count(ENV_CHUNK_SIZE, &raw)?;
        }
        Ok(cfg)
    }
}

/// Delimiter implied by a format name: `tsv` means tab, whatever the file extension.
pub fn format_delimiter(raw: &str) -> Option<u8> {
    raw.trim().eq_ignore_ascii_case("tsv").then_some(b'\t')
}

/// Parse a field delimiter: one ASCII character, or `\t` / `tab` for tab.
pub fn parse_delimiter(raw: &str) -> Option<u8> {
    match raw {
        "\\t" | "tab" | "\t" => Some(b'\t'),
        _ => match raw.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            _ => None,
        },
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(invalid(key, raw, "must be greater than zero".to_string())),
        Err(e) => Err(invalid(key, raw, e.to_string())),
    }
}

fn invalid(key: &str, value: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message,
    }
}
