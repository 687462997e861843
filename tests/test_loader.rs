//! Unit tests for the CSV loader

use fraud_trainer::pipeline::{
    get_column_names, load_data, load_data_with_schema_length, ErrorKind, PipelineError,
};
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_transactions_fixture() {
    let (_dir, path) = common::create_transactions_csv();
    let df = load_data(&path).unwrap();

    common::assert_shape(&df, 10, 3);
    assert_eq!(df.get_column_names(), &["amount", "country", "is_fraud"]);
    assert_eq!(df.column("amount").unwrap().null_count(), 1);
    assert_eq!(df.column("country").unwrap().null_count(), 1);
    assert_eq!(df.column("amount").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("is_fraud").unwrap().dtype(), &DataType::Int64);
}

#[test]
fn test_load_round_trips_written_frame() {
    let mut df = common::create_synthetic_transactions(50, 1);
    let (_dir, path) = common::create_temp_csv(&mut df);

    let loaded = load_data_with_schema_length(&path, 0).unwrap();
    common::assert_shape(&loaded, 50, 4);
}

#[test]
fn test_missing_file_is_file_access() {
    let dir = TempDir::new().unwrap();
    let err = load_data(&dir.path().join("nope.csv")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileAccess);
}

#[test]
fn test_directory_is_file_access() {
    let dir = TempDir::new().unwrap();
    let err = load_data(dir.path()).unwrap_err();
    assert!(matches!(err, PipelineError::FileAccess { .. }));
}

#[test]
fn test_ragged_rows_are_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(dir.path(), "bad.csv", "a,b\n1,2\n3,4,5,6\n");
    let err = load_data(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_header_only_column_names() {
    let (_dir, path) = common::create_transactions_csv();
    let names = get_column_names(&path).unwrap();
    assert_eq!(names, vec!["amount", "country", "is_fraud"]);
}
