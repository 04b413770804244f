use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

use upi_insights::ingestion::{load_from_path, LoadOptions, SourceFormat};
use upi_insights::store::RowStore;
use upi_insights::types::{Column, Row};
use upi_insights::LoadError;

fn tmp_file(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("upi-insights-{name}-{nanos}.{ext}"))
}

/// The three rows shared by the TSV, JSON and NDJSON fixtures, as (status, amount, state, network).
fn assert_three_rows(rows: &[Row]) {
    let got: Vec<(Option<&str>, Option<&str>, Option<&str>, Option<&str>)> = rows
        .iter()
        .map(|r| {
            (
                r.get(Column::TransactionStatus),
                r.get(Column::AmountInr),
                r.get(Column::SenderState),
                r.get(Column::NetworkType),
            )
        })
        .collect();
    assert_eq!(got.len(), 3);
    assert_eq!(got[0], (Some("SUCCESS"), Some("100"), Some("Maharashtra"), None));
    assert_eq!(got[1].0, Some("FAILED"));
    assert_eq!(got[1].2, Some("Maharashtra"));
    assert_eq!(got[1].3, Some("4G"));
    assert_eq!(got[2], (Some("SUCCESS"), Some("300"), Some("Kerala"), None));
}

#[test]
fn csv_headers_are_normalized_and_extra_columns_dropped() {
    let rows = load_from_path("tests/fixtures/transactions.csv", &LoadOptions::default()).unwrap();

    assert_eq!(rows.len(), 8);
    let first = &rows[0];
    assert_eq!(first.get(Column::TransactionType), Some("P2M"));
    assert_eq!(first.get(Column::AmountInr), Some("6500"));
    assert_eq!(first.get(Column::Timestamp), Some("2024-01-05 19:10:00"));
    assert_eq!(first.get(Column::IsWeekend), Some("0"));
    // Empty merchant_category cells are absent.
    assert_eq!(rows[2].get(Column::MerchantCategory), None);
    assert_eq!(rows[7].get(Column::SenderState), Some("Kerala"));
}

#[test]
fn tsv_uses_tab_delimiter_by_extension() {
    let rows = load_from_path("tests/fixtures/three_rows.tsv", &LoadOptions::default()).unwrap();
    assert_three_rows(&rows);
}

#[test]
fn json_array_and_ndjson_load_the_same_rows() {
    let opts = LoadOptions::default();
    let array = load_from_path("tests/fixtures/three_rows.json", &opts).unwrap();
    let ndjson = load_from_path("tests/fixtures/three_rows.ndjson", &opts).unwrap();

    assert_three_rows(&array);
    assert_eq!(array, ndjson);
    // Numbers and booleans keep their JSON text.
    assert_eq!(array[1].get(Column::AmountInr), Some("200.0"));
    assert_eq!(array[2].get(Column::IsWeekend), Some("true"));
}

#[test]
fn forced_format_overrides_extension() {
    let path = tmp_file("forced", "dat");
    std::fs::copy("tests/fixtures/three_rows.tsv", &path).unwrap();

    let err = load_from_path(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::SchemaMismatch { .. }));

    let opts = LoadOptions {
        format: Some(SourceFormat::Delimited),
        delimiter: Some(b'\t'),
        ..Default::default()
    };
    assert_three_rows(&load_from_path(&path, &opts).unwrap());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_required_column_is_a_schema_mismatch() {
    let path = tmp_file("missing-col", "csv");
    std::fs::write(&path, "transaction_status,amount (INR)\nSUCCESS,10\n").unwrap();

    let err = load_from_path(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::SchemaMismatch { .. }));
    assert!(err.to_string().contains("missing required column"));

    // Relaxing the requirement loads what is there.
    let opts = LoadOptions {
        required_columns: vec![Column::TransactionStatus],
        ..Default::default()
    };
    let rows = load_from_path(&path, &opts).unwrap();
    assert_eq!(rows[0].get(Column::AmountInr), Some("10"));
    assert_eq!(rows[0].get(Column::SenderState), None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn headers_that_normalize_to_the_same_column_are_rejected() {
    let path = tmp_file("dup-col", "csv");
    std::fs::write(&path, "Sender State,sender_state\nGoa,Goa\n").unwrap();

    let opts = LoadOptions {
        required_columns: vec![],
        ..Default::default()
    };
    let err = load_from_path(&path, &opts).unwrap_err();
    assert!(err.to_string().contains("duplicate column 'sender_state'"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn ragged_record_is_a_csv_error() {
    let path = tmp_file("ragged", "csv");
    std::fs::write(&path, "transaction_status,amount_inr\nSUCCESS,10\nFAILED\n").unwrap();

    let opts = LoadOptions {
        required_columns: vec![],
        ..Default::default()
    };
    let err = load_from_path(&path, &opts).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = RowStore::load("tests/fixtures/does_not_exist.csv", &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

fn write_transactions_parquet(path: &PathBuf) {
    let schema_str = r#"
    message schema {
      REQUIRED BINARY timestamp (UTF8);
      REQUIRED BINARY transaction_type (UTF8);
      REQUIRED BINARY merchant_category (UTF8);
      REQUIRED DOUBLE amount_inr;
      REQUIRED BINARY transaction_status (UTF8);
      REQUIRED BINARY sender_age_group (UTF8);
      REQUIRED BINARY sender_state (UTF8);
      REQUIRED BINARY sender_bank (UTF8);
      REQUIRED BINARY device_type (UTF8);
      REQUIRED BINARY network_type (UTF8);
      REQUIRED INT64 fraud_flag;
      REQUIRED INT64 hour_of_day;
      REQUIRED BINARY day_of_week (UTF8);
      REQUIRED BOOLEAN is_weekend;
    }
    "#;

    let text_columns: [[&str; 2]; 10] = [
        ["2024-02-01 10:00:00", "2024-02-02 19:00:00"],
        ["P2M", "P2P"],
        ["Grocery", "Food"],
        ["SUCCESS", "FAILED"],
        ["26-35", "18-25"],
        ["Goa", "Delhi"],
        ["SBI", "HDFC"],
        ["Android", "iOS"],
        ["4G", "5G"],
        ["Thursday", "Friday"],
    ];

    let schema = Arc::new(parse_message_type(schema_str).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    let mut text_idx = 0usize;
    let mut int_idx = 0usize;
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::ByteArrayColumnWriter(w) => {
                let values: Vec<ByteArray> = text_columns[text_idx]
                    .iter()
                    .map(|s| ByteArray::from(*s))
                    .collect();
                w.write_batch(&values, None, None).unwrap();
                text_idx += 1;
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                w.write_batch(&[6500.5_f64, 120.0_f64], None, None).unwrap();
            }
            ColumnWriter::Int64ColumnWriter(w) => {
                // fraud_flag first, then hour_of_day.
                let values: [i64; 2] = if int_idx == 0 { [1, 0] } else { [10, 19] };
                w.write_batch(&values, None, None).unwrap();
                int_idx += 1;
            }
            ColumnWriter::BoolColumnWriter(w) => {
                w.write_batch(&[false, false], None, None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
    }
    rg.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_cells_load_as_text() {
    let path = tmp_file("transactions", "parquet");
    write_transactions_parquet(&path);

    let rows = load_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get(Column::TransactionType), Some("P2M"));
    assert_eq!(rows[0].get(Column::AmountInr), Some("6500.5"));
    assert_eq!(rows[0].get(Column::FraudFlag), Some("1"));
    assert_eq!(rows[1].get(Column::HourOfDay), Some("19"));
    assert_eq!(rows[1].get(Column::IsWeekend), Some("false"));
    assert_eq!(rows[1].get(Column::SenderState), Some("Delhi"));
    let _ = std::fs::remove_file(&path);
}
