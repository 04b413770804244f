//! The immutable in-memory row store and its load-once accessor.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::error::LoadResult;
use crate::ingestion::{load_from_path, LoadOptions, LoadRequest};
use crate::types::Row;

/// An ordered, immutable collection of every loaded [`Row`].
///
/// Source order is preserved. There is no write path: once built, a store only hands out
/// shared references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    /// Wrap already-built rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Load a store from `path`. See [`load_from_path`].
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        load_from_path(path, options).map(Self::new)
    }

    /// All rows, in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for RowStore {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Memoized, thread-safe accessor for a [`RowStore`].
///
/// The first successful [`LazyRowStore::get_rows`] reads the source; every later call returns
/// the same store without touching the source again. A failed load caches nothing, so no
/// partially loaded state is ever visible.
#[derive(Debug)]
pub struct LazyRowStore {
    request: LoadRequest,
    store: OnceLock<RowStore>,
    load_lock: Mutex<()>,
    loads: AtomicUsize,
}

impl LazyRowStore {
    pub fn new(request: LoadRequest) -> Self {
        Self {
            request,
            store: OnceLock::new(),
            load_lock: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Return the cached store, loading it first if this is the first access.
    pub fn get_rows(&self) -> LoadResult<&RowStore> {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }

        // Serialize first loads; a thread that waited here finds the store already set.
        let _guard = self.load_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(store) = self.store.get() {
            return Ok(store);
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        let rows = self.request.run()?;
        Ok(self.store.get_or_init(|| RowStore::new(rows)))
    }

    /// Whether the store has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.store.get().is_some()
    }

    /// Number of times the source has been read (including failed attempts).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// The request this store loads from.
    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    /// Consume the accessor, returning the store if it was loaded.
    pub fn into_inner(self) -> Option<RowStore> {
        self.store.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{LazyRowStore, RowStore};
    use crate::ingestion::{LoadOptions, LoadRequest};
    use crate::types::{Column, Row};

    fn missing_request() -> LoadRequest {
        LoadRequest::new("does/not/exist.csv", LoadOptions::default())
    }

    #[test]
    fn store_preserves_row_order() {
        let store = RowStore::new(vec![
            Row::new().with(Column::SenderState, "Kerala"),
            Row::new().with(Column::SenderState, "Goa"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.rows()[1].get(Column::SenderState), Some("Goa"));
    }

    #[test]
    fn failed_load_caches_nothing_and_retries() {
        let lazy = LazyRowStore::new(missing_request());

        assert!(lazy.get_rows().is_err());
        assert!(!lazy.is_loaded());
        assert!(lazy.get_rows().is_err());
        assert_eq!(lazy.load_count(), 2);
    }

    #[test]
    fn concurrent_failed_loads_do_not_poison_the_lock() {
        let lazy = Arc::new(LazyRowStore::new(missing_request()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                std::thread::spawn(move || lazy.get_rows().is_err())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
        assert_eq!(lazy.load_count(), 4);
    }
}
