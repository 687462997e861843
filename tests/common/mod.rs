//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Ten transactions, both classes present, one missing amount and one
/// missing country
pub const TRANSACTIONS_CSV: &str = "\
amount,country,is_fraud
12.50,US,0
980.00,NG,1
45.10,DE,0
,US,0
1500.75,RU,1
23.00,,0
870.40,NG,1
60.00,FR,0
1320.00,RU,1
910.90,BR,1
";

/// Write `contents` to `dir/name` and return the path
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Create a temporary directory holding the ten-row transactions fixture
pub fn create_transactions_csv() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(temp_dir.path(), "transactions.csv", TRANSACTIONS_CSV);
    (temp_dir, path)
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Seeded synthetic transactions.
///
/// Fraud is mostly large night-time amounts, with a little label noise so
/// the forest has something to get wrong.
pub fn create_synthetic_transactions(rows: usize, seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let countries = ["US", "DE", "FR", "NG", "RU", "BR"];

    let mut amount = Vec::with_capacity(rows);
    let mut hour = Vec::with_capacity(rows);
    let mut country = Vec::with_capacity(rows);
    let mut is_fraud = Vec::with_capacity(rows);

    for _ in 0..rows {
        let a: f64 = rng.gen_range(1.0..2000.0);
        let h: i64 = rng.gen_range(0..24);
        let c = countries[rng.gen_range(0..countries.len())];
        let risky = a > 1000.0 && !(6..22).contains(&h);
        let noise = rng.gen_bool(0.05);
        amount.push(if rng.gen_bool(0.02) { None } else { Some(a) });
        hour.push(h);
        country.push(c);
        is_fraud.push(i64::from(risky ^ noise));
    }

    df! {
        "amount" => amount,
        "hour" => hour,
        "country" => country,
        "is_fraud" => is_fraud,
    }
    .unwrap()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}
