use thiserror::Error;

/// Convenience result type for row-store loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned while loading the row store.
///
/// Every variant is fatal: a process that cannot load its dataset cannot answer queries.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-file error, including records whose length does not match the header.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet decoding error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The source does not have the expected shape (missing header, missing or duplicated
    /// columns, unsupported format).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A cell could not be represented as text.
    #[error("failed to read value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

impl LoadError {
    /// Short, stable label for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
            Self::Parquet(_) => "parquet",
            Self::SchemaMismatch { .. } => "schema",
            Self::ParseError { .. } => "parse",
        }
    }
}

/// Error returned when an [`crate::execution::ExecutionEngine`] cannot be built.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("invalid execution options: {message}")]
    InvalidOptions { message: String },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Error returned when assembling an [`crate::engine::InsightEngine`] from configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error returned when a configuration value cannot be interpreted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({message})")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}
