//! Parquet loading.

use std::fs::File;
use std::path::Path;

use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::{LoadError, LoadResult};
use crate::types::{Column, Row};

use super::header::ColumnMap;

/// Load a Parquet file into rows.
///
/// Notes:
/// - Leaf column paths are normalized like delimited-file headers and checked against
///   `required`.
/// - Uses the Parquet record API (`RowIter`); every cell is rendered as text.
pub fn load_parquet_from_path(path: impl AsRef<Path>, required: &[Column]) -> LoadResult<Vec<Row>> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file)?;

    let leaf_columns = parquet_leaf_column_paths(&reader);
    ColumnMap::resolve(leaf_columns.iter().map(String::as_str), required)?;

    let mut rows = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let record = row_res?;

        let mut row = Row::new();
        for (name, field) in record.get_column_iter() {
            if let Some(col) = Column::from_header(name) {
                row.set(col, parquet_cell_text(row_num, col, field)?);
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

fn parquet_leaf_column_paths<R: ChunkReader + 'static>(
    reader: &SerializedFileReader<R>,
) -> Vec<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.path().string())
        .collect()
}

fn parquet_cell_text(row: usize, column: Column, f: &Field) -> LoadResult<Option<String>> {
    match f {
        Field::Null => Ok(None),
        Field::Str(s) => Ok(Some(s.clone())),
        Field::Bool(b) => Ok(Some(b.to_string())),
        Field::Byte(v) => Ok(Some(v.to_string())),
        Field::Short(v) => Ok(Some(v.to_string())),
        Field::Int(v) => Ok(Some(v.to_string())),
        Field::Long(v) => Ok(Some(v.to_string())),
        Field::UByte(v) => Ok(Some(v.to_string())),
        Field::UShort(v) => Ok(Some(v.to_string())),
        Field::UInt(v) => Ok(Some(v.to_string())),
        Field::ULong(v) => Ok(Some(v.to_string())),
        Field::Float(v) => Ok(Some(v.to_string())),
        Field::Double(v) => Ok(Some(v.to_string())),
        Field::Group(_) | Field::ListInternal(_) | Field::MapInternal(_) => {
            Err(LoadError::ParseError {
                row,
                column: column.name().to_string(),
                raw: f.to_string(),
                message: "expected a scalar value".to_string(),
            })
        }
        // Dates, timestamps, decimals and raw bytes use the record API's display form.
        other => Ok(Some(other.to_string())),
    }
}
