//! Chunked parallel row selection.
//!
//! Every query starts by picking its population out of the row store. This module runs that
//! scan on a rayon pool:
//!
//! - the row slice is split into fixed-size chunks evaluated in parallel
//! - selected rows are reassembled in source order
//! - cumulative metrics and observer events are recorded per run

mod observer;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::ExecutionError;
use crate::types::Row;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    TracingExecutionObserver,
};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Number of worker threads in a dedicated pool.
    ///
    /// If `None`, runs on rayon's global pool.
    pub num_threads: Option<usize>,
    /// Number of rows per chunk.
    pub chunk_size: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            chunk_size: 4_096,
        }
    }
}

/// Runs row selections over an in-memory row slice.
pub struct ExecutionEngine {
    pool: Option<ThreadPool>,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl fmt::Debug for ExecutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionEngine")
            .field("opts", &self.opts)
            .field("dedicated_pool", &self.pool.is_some())
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self {
            pool: None,
            opts: ExecutionOptions::default(),
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    pub fn new(opts: ExecutionOptions) -> Result<Self, ExecutionError> {
        if opts.chunk_size == 0 {
            return Err(ExecutionError::InvalidOptions {
                message: "chunk_size must be > 0".to_string(),
            });
        }
        let pool = match opts.num_threads {
            Some(0) => {
                return Err(ExecutionError::InvalidOptions {
                    message: "num_threads must be > 0 when set".to_string(),
                });
            }
            Some(n) => Some(ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events.
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to the engine's cumulative metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.opts
    }

    /// Select the rows matching `predicate`, in source order.
    pub fn select<'a, F>(&self, rows: &'a [Row], predicate: F) -> Vec<&'a Row>
    where
        F: Fn(&Row) -> bool + Send + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| self.select_impl(rows, &predicate)),
            None => self.select_impl(rows, &predicate),
        }
    }

    fn select_impl<'a>(
        &self,
        rows: &'a [Row],
        predicate: &(dyn Fn(&Row) -> bool + Send + Sync),
    ) -> Vec<&'a Row> {
        let start = Instant::now();
        self.emit(ExecutionEvent::RunStarted { rows: rows.len() });

        let chunk_size = self.opts.chunk_size;
        let per_chunk: Vec<Vec<&'a Row>> = rows
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                let out: Vec<&'a Row> = chunk.iter().filter(|&row| predicate(row)).collect();
                self.metrics.on_chunk(chunk.len(), out.len());
                self.emit(ExecutionEvent::ChunkFinished {
                    start_row: idx * chunk_size,
                    scanned: chunk.len(),
                    selected: out.len(),
                });
                out
            })
            .collect();

        let selected: Vec<&'a Row> = per_chunk.into_iter().flatten().collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            selected: selected.len(),
        });

        selected
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(o) = self.observer.as_ref() {
            o.on_event(&event);
        }
    }
}
