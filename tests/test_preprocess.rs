//! Tests for null fill and feature/label separation

use fraud_trainer::pipeline::{
    fill_missing, load_data, preprocess_data, preprocess_with_target, ErrorKind, FeatureEncoding,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_fill_missing_on_loaded_fixture() {
    let (_dir, path) = common::create_transactions_csv();
    let mut df = load_data(&path).unwrap();

    assert_eq!(fill_missing(&mut df).unwrap(), 2);
    let nulls: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
    assert_eq!(nulls, 0);

    let once = df.clone();
    assert_eq!(fill_missing(&mut df).unwrap(), 0);
    assert!(df.equals(&once), "second fill must not change the table");
}

#[test]
fn test_feature_columns_are_inputs_minus_label() {
    let (_dir, path) = common::create_transactions_csv();
    let mut df = load_data(&path).unwrap();
    let (features, labels) = preprocess_data(&mut df).unwrap();

    assert_eq!(features.names(), &["amount", "country"]);
    assert_eq!(features.n_rows(), df.height());
    assert_eq!(labels.len(), df.height());
    assert_eq!(labels.classes(), &["0", "1"]);
    assert_eq!(labels.values(), &[0, 1, 0, 0, 1, 0, 1, 0, 1, 1]);
}

#[test]
fn test_missing_amount_becomes_zero() {
    let (_dir, path) = common::create_transactions_csv();
    let mut df = load_data(&path).unwrap();
    let (features, _) = preprocess_data(&mut df).unwrap();

    assert_eq!(features.column("amount").unwrap()[3], 0.0);
}

#[test]
fn test_country_is_ordinal_encoded() {
    let (_dir, path) = common::create_transactions_csv();
    let mut df = load_data(&path).unwrap();
    let (features, _) = preprocess_data(&mut df).unwrap();

    match &features.encodings()[1] {
        FeatureEncoding::Ordinal { categories } => {
            assert_eq!(categories, &["0", "BR", "DE", "FR", "NG", "RU", "US"]);
        }
        other => panic!("expected ordinal encoding, got {:?}", other),
    }
    // The missing country sorts first
    assert_eq!(features.column("country").unwrap()[5], 0.0);
}

#[test]
fn test_missing_label_is_schema_error() {
    let mut df = df! {
        "amount" => [1.0f64, 2.0],
        "country" => ["US", "DE"],
    }
    .unwrap();
    let err = preprocess_data(&mut df).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn test_custom_target_column() {
    let mut df = df! {
        "amount" => [1.0f64, 2.0, 3.0],
        "label" => ["no", "yes", "no"],
    }
    .unwrap();
    let (features, labels) = preprocess_with_target(&mut df, "label").unwrap();
    assert_eq!(features.names(), &["amount"]);
    assert_eq!(labels.classes(), &["no", "yes"]);
}
