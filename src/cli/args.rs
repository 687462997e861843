//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{
    TrainingConfig, DEFAULT_INFER_SCHEMA_LENGTH, DEFAULT_INPUT_PATH, DEFAULT_MODEL_PATH,
    DEFAULT_N_TREES, DEFAULT_SEED, DEFAULT_TARGET_COLUMN, DEFAULT_TEST_SIZE,
};

/// fraud-trainer - Train a random-forest fraud classifier from a CSV of transactions
#[derive(Parser, Debug)]
#[command(name = "fraud-trainer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input CSV file with a header row
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Model artifact path. The parent directory must already exist.
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub output: PathBuf,

    /// Label column, excluded from the features
    #[arg(short, long, default_value = DEFAULT_TARGET_COLUMN)]
    pub target: String,

    /// Fraction of rows held out for evaluation (0 < x < 1)
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE, value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub split_seed: u64,

    /// Number of trees in the forest
    #[arg(long, default_value_t = DEFAULT_N_TREES, value_parser = validate_n_trees)]
    pub n_trees: usize,

    /// Seed for bootstrap sampling and feature subsampling
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub forest_seed: u64,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value_t = DEFAULT_INFER_SCHEMA_LENGTH)]
    pub infer_schema_length: usize,

    /// Also write the classification report and run metadata as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Suppress banner, progress and summary on stderr
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Emit diagnostic logs on stderr (overridden by RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a CSV with a saved model and print the classification report
    Evaluate {
        /// Model artifact written by a training run
        model: PathBuf,

        /// CSV file containing the model's feature columns and its label column
        input: PathBuf,

        /// Number of rows to use for schema inference.
        /// Use 0 for full table scan (very slow for large files).
        #[arg(long, default_value_t = DEFAULT_INFER_SCHEMA_LENGTH)]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Training parameters taken from the flags
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            target: self.target.clone(),
            test_size: self.test_size,
            split_seed: self.split_seed,
            n_trees: self.n_trees,
            forest_seed: self.forest_seed,
        }
    }
}

/// Validator for test_size parameter
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}

/// Validator for n_trees parameter
fn validate_n_trees(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid tree count", s))?;

    if value == 0 {
        Err("n_trees must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_fixed_defaults() {
        let cli = Cli::try_parse_from(["fraud-trainer"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input, PathBuf::from("data/transactions.csv"));
        assert_eq!(cli.output, PathBuf::from("models/fraud_detection_model.pkl"));
        assert_eq!(cli.training_config(), TrainingConfig::default());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "fraud-trainer",
            "--input",
            "x.csv",
            "--n-trees",
            "5",
            "--test-size",
            "0.3",
            "--target",
            "label",
        ])
        .unwrap();
        let config = cli.training_config();
        assert_eq!(cli.input, PathBuf::from("x.csv"));
        assert_eq!(config.n_trees, 5);
        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.target, "label");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["fraud-trainer", "--test-size", "1.0"]).is_err());
        assert!(Cli::try_parse_from(["fraud-trainer", "--test-size", "abc"]).is_err());
        assert!(Cli::try_parse_from(["fraud-trainer", "--n-trees", "0"]).is_err());
    }

    #[test]
    fn test_evaluate_subcommand() {
        let cli = Cli::try_parse_from(["fraud-trainer", "evaluate", "m.pkl", "d.csv"]).unwrap();
        match cli.command {
            Some(Commands::Evaluate {
                model,
                input,
                infer_schema_length,
            }) => {
                assert_eq!(model, PathBuf::from("m.pkl"));
                assert_eq!(input, PathBuf::from("d.csv"));
                assert_eq!(infer_schema_length, 10_000);
            }
            None => panic!("expected evaluate subcommand"),
        }
    }
}
