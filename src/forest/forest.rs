//! Random-forest fitting with per-tree seeds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::config::ForestConfig;
use super::error::ForestError;
use super::tree::{DecisionTree, TreeParams};

/// A fitted random-forest ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) n_features: usize,
    pub(crate) n_classes: usize,
}

/// Validate row-major training input and return the feature count.
fn validate_training_data(
    features: &[Vec<f64>],
    labels: &[usize],
    n_classes: usize,
) -> Result<usize, ForestError> {
    let first = features.first().ok_or(ForestError::EmptyDataset)?;
    let n_features = first.len();
    if n_features == 0 {
        return Err(ForestError::ZeroFeatures);
    }
    if labels.len() != features.len() {
        return Err(ForestError::LabelCountMismatch {
            n_samples: features.len(),
            n_labels: labels.len(),
        });
    }

    for (sample_index, row) in features.iter().enumerate() {
        if row.len() != n_features {
            return Err(ForestError::FeatureCountMismatch {
                expected: n_features,
                got: row.len(),
                sample_index,
            });
        }
        if let Some(feature_index) = row.iter().position(|v| !v.is_finite()) {
            return Err(ForestError::NonFiniteValue {
                sample_index,
                feature_index,
            });
        }
    }

    if let Some((sample_index, &label)) = labels
        .iter()
        .enumerate()
        .find(|&(_, &l)| l >= n_classes)
    {
        return Err(ForestError::LabelOutOfRange {
            label,
            sample_index,
            n_classes,
        });
    }

    Ok(n_features)
}

#[instrument(skip_all, fields(n_trees = config.n_trees(), n_samples = features.len()))]
pub(crate) fn fit_forest(
    config: &ForestConfig,
    features: &[Vec<f64>],
    labels: &[usize],
    n_classes: usize,
) -> Result<RandomForest, ForestError> {
    config.validate()?;
    let n_features = validate_training_data(features, labels, n_classes)?;
    let max_features = config.max_features().resolve(n_features)?;
    let n_samples = features.len();

    info!(
        n_trees = config.n_trees(),
        n_samples,
        n_features,
        n_classes,
        max_features,
        "fitting random forest"
    );

    // Column-major copy shared read-only by every tree.
    let columns: Vec<Vec<f64>> = (0..n_features)
        .map(|j| features.iter().map(|row| row[j]).collect())
        .collect();

    let params = TreeParams {
        max_features,
        max_depth: config.max_depth(),
        min_samples_split: config.min_samples_split(),
        min_samples_leaf: config.min_samples_leaf(),
    };
    let bootstrap = config.bootstrap();

    // Seeds are drawn up front so tree i is the same whichever thread builds it.
    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed());
    let tree_seeds: Vec<u64> = (0..config.n_trees()).map(|_| master_rng.gen()).collect();

    let trees: Vec<DecisionTree> = tree_seeds
        .into_par_iter()
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let samples: Vec<usize> = if bootstrap {
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };
            DecisionTree::grow(&columns, labels, samples, n_classes, params, &mut rng)
        })
        .collect();

    debug!(
        total_nodes = trees.iter().map(DecisionTree::n_nodes).sum::<usize>(),
        "random forest fitted"
    );

    Ok(RandomForest {
        trees,
        n_features,
        n_classes,
    })
}

impl RandomForest {
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Per-tree importances averaged over the ensemble.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.n_features];
        for tree in &self.trees {
            for (total, value) in totals.iter_mut().zip(tree.feature_importances()) {
                *total += value;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }
}
