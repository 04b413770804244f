//! JSON loading.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Object keys are normalized like delimited-file headers. The keys of the first object act as
//! the header for required-column checks; later objects may omit keys (absent cells).

use std::fs;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::{Column, Row};

use super::header::ColumnMap;

/// Load JSON into rows.
pub fn load_json_from_path(path: impl AsRef<Path>, required: &[Column]) -> LoadResult<Vec<Row>> {
    let text = fs::read_to_string(path)?;
    load_json_from_str(&text, required)
}

/// Load JSON from an in-memory string.
pub fn load_json_from_str(input: &str, required: &[Column]) -> LoadResult<Vec<Row>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LoadError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => load_json_values(&items, required),
            serde_json::Value::Object(_) => load_json_values(std::slice::from_ref(&v), required),
            _ => Err(LoadError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                LoadError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        load_json_values(&values, required)
    }
}

fn load_json_values(values: &[serde_json::Value], required: &[Column]) -> LoadResult<Vec<Row>> {
    let mut rows = Vec::with_capacity(values.len());
    let Some(first) = values.first() else {
        return Ok(rows);
    };
    ColumnMap::resolve(object_of(1, first)?.keys().map(String::as_str), required)?;

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = object_of(row_num, v)?;

        let mut row = Row::new();
        for (key, jv) in obj {
            if let Some(col) = Column::from_header(key) {
                row.set(col, json_cell_text(row_num, col, jv)?);
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

fn object_of(
    row_num: usize,
    v: &serde_json::Value,
) -> LoadResult<&serde_json::Map<String, serde_json::Value>> {
    v.as_object().ok_or_else(|| LoadError::SchemaMismatch {
        message: format!("row {row_num} is not a json object"),
    })
}

fn json_cell_text(row: usize, column: Column, v: &serde_json::Value) -> LoadResult<Option<String>> {
    match v {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s.clone())),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(LoadError::ParseError {
            row,
            column: column.name().to_string(),
            raw: v.to_string(),
            message: "expected a scalar value".to_string(),
        }),
    }
}
