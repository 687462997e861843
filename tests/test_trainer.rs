//! Tests for splitting, fitting, and the held-out report

use fraud_trainer::pipeline::{
    load_data, preprocess_data, train_model, ErrorKind, FeatureMatrix, LabelVector, PipelineError,
    TrainingConfig,
};

#[path = "common/mod.rs"]
mod common;

fn fast_config() -> TrainingConfig {
    TrainingConfig {
        n_trees: 20,
        ..Default::default()
    }
}

#[test]
fn test_fixture_split_sizes() {
    let (_dir, path) = common::create_transactions_csv();
    let mut df = load_data(&path).unwrap();
    let (features, labels) = preprocess_data(&mut df).unwrap();
    let outcome = train_model(&features, &labels, &TrainingConfig::default()).unwrap();

    assert_eq!(outcome.split().x_test.n_rows(), 2);
    assert_eq!(outcome.split().x_train.n_rows(), 8);
    assert_eq!(outcome.predictions().len(), 2);
    assert_eq!(outcome.model().forest().n_trees(), 100);
}

#[test]
fn test_report_lists_both_classes() {
    let (_dir, path) = common::create_transactions_csv();
    let mut df = load_data(&path).unwrap();
    let (features, labels) = preprocess_data(&mut df).unwrap();
    let outcome = train_model(&features, &labels, &TrainingConfig::default()).unwrap();

    let text = outcome.report().to_string();
    let rows: Vec<&str> = text.lines().map(str::trim_start).collect();
    assert!(rows.iter().any(|l| l.starts_with("0 ")));
    assert!(rows.iter().any(|l| l.starts_with("1 ")));
    assert!(rows.iter().any(|l| l.starts_with("accuracy")));
}

#[test]
fn test_synthetic_data_is_learnable() {
    let mut df = common::create_synthetic_transactions(400, 7);
    let (features, labels) = preprocess_data(&mut df).unwrap();
    let outcome = train_model(&features, &labels, &fast_config()).unwrap();

    assert_eq!(outcome.split().x_test.n_rows(), 80);
    assert!(
        outcome.report().accuracy > 0.75,
        "accuracy {} too low",
        outcome.report().accuracy
    );
}

#[test]
fn test_same_seeds_same_report() {
    let mut df = common::create_synthetic_transactions(200, 3);
    let (features, labels) = preprocess_data(&mut df).unwrap();

    let a = train_model(&features, &labels, &fast_config()).unwrap();
    let b = train_model(&features, &labels, &fast_config()).unwrap();
    assert_eq!(a.report(), b.report());
    assert_eq!(a.predictions(), b.predictions());
    assert_eq!(a.split().test_indices, b.split().test_indices);
}

#[test]
fn test_different_split_seed_changes_partition() {
    let mut df = common::create_synthetic_transactions(200, 3);
    let (features, labels) = preprocess_data(&mut df).unwrap();

    let a = train_model(&features, &labels, &fast_config()).unwrap();
    let b = train_model(
        &features,
        &labels,
        &TrainingConfig {
            split_seed: 43,
            ..fast_config()
        },
    )
    .unwrap();
    assert_ne!(a.split().test_indices, b.split().test_indices);
}

#[test]
fn test_single_class_is_value_error() {
    let features = FeatureMatrix::new(
        vec!["amount".into()],
        (0..10).map(|i| vec![i as f64]).collect(),
    )
    .unwrap();
    let labels = LabelVector::new(vec![1; 10], vec!["0".into(), "1".into()]).unwrap();

    let err = train_model(&features, &labels, &fast_config()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert!(matches!(err, PipelineError::InsufficientClasses { .. }));
}

#[test]
fn test_row_count_mismatch_is_value_error() {
    let features = FeatureMatrix::new(
        vec!["amount".into()],
        (0..10).map(|i| vec![i as f64]).collect(),
    )
    .unwrap();
    let labels = LabelVector::new(vec![0, 1, 0], vec!["0".into(), "1".into()]).unwrap();

    let err = train_model(&features, &labels, &fast_config()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
}
