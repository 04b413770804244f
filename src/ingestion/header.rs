//! Header resolution shared by every source format.

use crate::error::{LoadError, LoadResult};
use crate::types::{normalize_column, Column, Row};

/// Maps source column positions to recognized [`Column`]s.
///
/// Source columns outside the recognized set map to `None` and are dropped at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    slots: Vec<Option<Column>>,
}

impl ColumnMap {
    /// Resolve raw header names, checking that every `required` column is present exactly once.
    pub fn resolve<'a, I>(headers: I, required: &[Column]) -> LoadResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let raw: Vec<&str> = headers.into_iter().collect();
        if raw.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::SchemaMismatch {
                message: "source has no header row".to_string(),
            });
        }

        let normalized: Vec<String> = raw.iter().map(|h| normalize_column(h)).collect();
        let mut slots = Vec::with_capacity(raw.len());
        for name in &normalized {
            let col = Column::from_normalized(name);
            if let Some(c) = col {
                if slots.contains(&Some(c)) {
                    return Err(LoadError::SchemaMismatch {
                        message: format!("duplicate column '{c}'. headers={raw:?}"),
                    });
                }
            }
            slots.push(col);
        }

        for col in required {
            if !slots.contains(&Some(*col)) {
                return Err(LoadError::SchemaMismatch {
                    message: format!(
                        "missing required column '{col}'. headers={normalized:?}"
                    ),
                });
            }
        }

        Ok(Self { slots })
    }

    /// Number of source columns (recognized or not).
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Recognized column at source position `idx`.
    pub fn column_at(&self, idx: usize) -> Option<Column> {
        self.slots.get(idx).copied().flatten()
    }

    /// Build a [`Row`] from positional cells.
    pub fn build_row<'a, I>(&self, cells: I) -> Row
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut row = Row::new();
        for (idx, cell) in cells.into_iter().enumerate() {
            if let Some(col) = self.column_at(idx) {
                row.set(col, Some(cell.to_owned()));
            }
        }
        row
    }
}
