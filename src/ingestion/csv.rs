//! Delimited-file (CSV/TSV) loading.

use std::fs::File;
use std::path::Path;

use crate::error::LoadResult;
use crate::types::{Column, Row};

use super::header::ColumnMap;

/// Load a delimited file into rows, preserving source order.
///
/// Rules:
///
/// - The file must have a header row.
/// - Headers are normalized and must contain every `required` column (order can differ).
/// - Every record must have as many fields as the header.
/// - Cells are kept as raw text; empty cells become absent.
///
/// A missing or unreadable file is reported as [`crate::LoadError::Io`].
pub fn load_csv_from_path(
    path: impl AsRef<Path>,
    delimiter: u8,
    required: &[Column],
) -> LoadResult<Vec<Row>> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(file);
    load_csv_from_reader(&mut rdr, required)
}

/// Load rows from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    required: &[Column],
) -> LoadResult<Vec<Row>> {
    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::resolve(headers.iter(), required)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(columns.build_row(record.iter()));
    }

    Ok(rows)
}
