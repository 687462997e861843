//! Prediction methods for the random-forest ensemble.

use rayon::prelude::*;

use super::error::ForestError;
use super::forest::RandomForest;

/// Index of the largest probability; ties go to the lowest class index.
fn argmax(probabilities: &[f64]) -> usize {
    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > probabilities[best] {
            best = i;
        }
    }
    best
}

impl RandomForest {
    /// Class probabilities for one sample: the mean of the leaf
    /// distributions reached in every tree.
    pub fn predict_proba(&self, sample: &[f64]) -> Result<Vec<f64>, ForestError> {
        if sample.len() != self.n_features {
            return Err(ForestError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: sample.len(),
            });
        }

        let mut mean = vec![0.0f64; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in mean.iter_mut().zip(tree.leaf_distribution(sample)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        mean.iter_mut().for_each(|v| *v /= n);
        Ok(mean)
    }

    pub fn predict(&self, sample: &[f64]) -> Result<usize, ForestError> {
        Ok(argmax(&self.predict_proba(sample)?))
    }

    /// Predict a batch in parallel; output order matches `samples`.
    pub fn predict_batch(&self, samples: &[Vec<f64>]) -> Result<Vec<usize>, ForestError> {
        samples.par_iter().map(|s| self.predict(s)).collect()
    }
}
