//! Seeded train/test partition

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::PipelineError;
use super::preprocess::FeatureMatrix;
use super::target::LabelVector;

/// Training and held-out partitions, row-aligned
#[derive(Debug, Clone)]
pub struct SplitDatasets {
    pub x_train: FeatureMatrix,
    pub x_test: FeatureMatrix,
    pub y_train: LabelVector,
    pub y_test: LabelVector,
    /// Source row of every training row
    pub train_indices: Vec<usize>,
    /// Source row of every held-out row
    pub test_indices: Vec<usize>,
}

/// Shuffle row indices with `seed` and hold out `ceil(test_size * n)` rows.
pub fn train_test_split(
    features: &FeatureMatrix,
    labels: &LabelVector,
    test_size: f64,
    seed: u64,
) -> Result<SplitDatasets, PipelineError> {
    if features.n_rows() != labels.len() {
        return Err(PipelineError::RowCountMismatch {
            features: features.n_rows(),
            labels: labels.len(),
        });
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidTestSize { test_size });
    }

    let n_rows = features.n_rows();
    let n_test = (test_size * n_rows as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(PipelineError::EmptySplit { n_rows, test_size });
    }

    let mut permutation: Vec<usize> = (0..n_rows).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let test_indices = permutation[..n_test].to_vec();
    let train_indices = permutation[n_test..].to_vec();

    Ok(SplitDatasets {
        x_train: features.select(&train_indices),
        x_test: features.select(&test_indices),
        y_train: labels.select(&train_indices),
        y_test: labels.select(&test_indices),
        train_indices,
        test_indices,
    })
}
