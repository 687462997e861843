//! Training configuration and the fixed defaults of the training run

use serde::{Deserialize, Serialize};

use crate::forest::{ForestConfig, ForestError};

/// Input file read when no path is given
pub const DEFAULT_INPUT_PATH: &str = "data/transactions.csv";

/// Model artifact written when no path is given
pub const DEFAULT_MODEL_PATH: &str = "models/fraud_detection_model.pkl";

/// Binary label column
pub const DEFAULT_TARGET_COLUMN: &str = "is_fraud";

/// Fraction of rows held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Seed shared by the train/test split and the forest
pub const DEFAULT_SEED: u64 = 42;

/// Number of trees in the ensemble
pub const DEFAULT_N_TREES: usize = 100;

/// Rows sampled for CSV schema inference
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

/// Parameters of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Label column, excluded from the features
    pub target: String,
    /// Held-out fraction, in (0, 1)
    pub test_size: f64,
    /// Seed for the train/test shuffle
    pub split_seed: u64,
    /// Number of trees
    pub n_trees: usize,
    /// Seed for bootstrap sampling and feature subsampling
    pub forest_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET_COLUMN.to_string(),
            test_size: DEFAULT_TEST_SIZE,
            split_seed: DEFAULT_SEED,
            n_trees: DEFAULT_N_TREES,
            forest_seed: DEFAULT_SEED,
        }
    }
}

impl TrainingConfig {
    /// Forest configuration for this run
    pub fn forest_config(&self) -> Result<ForestConfig, ForestError> {
        Ok(ForestConfig::new(self.n_trees)?.with_seed(self.forest_seed))
    }
}
