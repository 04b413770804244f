use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted { rows: usize },
    ChunkFinished {
        start_row: usize,
        scanned: usize,
        selected: usize,
    },
    RunFinished { elapsed: Duration, selected: usize },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Emits execution events through `tracing` at trace level.
#[derive(Debug, Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        tracing::trace!(?event, "execution event");
    }
}

/// Cumulative metrics across every selection run on an engine.
///
/// Counters only grow; callers can snapshot them at any time, including while queries run.
#[derive(Debug, Default)]
pub struct ExecutionMetrics {
    runs: AtomicU64,
    rows_scanned: AtomicU64,
    rows_selected: AtomicU64,
    chunks: AtomicU64,
    last_elapsed_ns: AtomicU64,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_chunk(&self, scanned: usize, selected: usize) {
        let _ = self.chunks.fetch_add(1, Ordering::Relaxed);
        let _ = self.rows_scanned.fetch_add(scanned as u64, Ordering::Relaxed);
        let _ = self.rows_selected.fetch_add(selected as u64, Ordering::Relaxed);
    }

    pub fn end_run(&self, elapsed: Duration) {
        let _ = self.runs.fetch_add(1, Ordering::Relaxed);
        self.last_elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let last_elapsed_ns = self.last_elapsed_ns.load(Ordering::Relaxed);
        ExecutionMetricsSnapshot {
            runs: self.runs.load(Ordering::Relaxed),
            rows_scanned: self.rows_scanned.load(Ordering::Relaxed),
            rows_selected: self.rows_selected.load(Ordering::Relaxed),
            chunks: self.chunks.load(Ordering::Relaxed),
            last_elapsed: (last_elapsed_ns > 0).then(|| Duration::from_nanos(last_elapsed_ns)),
        }
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub runs: u64,
    pub rows_scanned: u64,
    pub rows_selected: u64,
    pub chunks: u64,
    pub last_elapsed: Option<Duration>,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "runs={}, rows_scanned={}, rows_selected={}, chunks={}, last_elapsed={:?}",
            self.runs, self.rows_scanned, self.rows_selected, self.chunks, self.last_elapsed
        )
    }
}
