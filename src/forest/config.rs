//! Builder-style configuration for forest training.

use super::error::ForestError;
use super::forest::{fit_forest, RandomForest};

/// Number of candidate features examined at each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, at least 1.
    #[default]
    Sqrt,
    /// `floor(log2(n_features))`, at least 1.
    Log2,
    /// Every feature at every split.
    All,
    /// A fixed count.
    Fixed(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete count for a dataset with `n_features` columns.
    pub fn resolve(self, n_features: usize) -> Result<usize, ForestError> {
        let resolved = match self {
            MaxFeatures::Sqrt => ((n_features as f64).sqrt().floor() as usize).max(1),
            MaxFeatures::Log2 => ((n_features as f64).log2().floor() as usize).max(1),
            MaxFeatures::All => n_features,
            MaxFeatures::Fixed(n) => n,
        };
        if resolved == 0 || resolved > n_features {
            return Err(ForestError::InvalidMaxFeatures {
                max_features: resolved,
                n_features,
            });
        }
        Ok(resolved)
    }
}

/// Configuration for random-forest training.
///
/// | Parameter           | Default |
/// |---------------------|---------|
/// | `max_features`      | `Sqrt`  |
/// | `max_depth`         | `None`  |
/// | `min_samples_split` | 2       |
/// | `min_samples_leaf`  | 1       |
/// | `bootstrap`         | `true`  |
/// | `seed`              | 42      |
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    n_trees: usize,
    max_features: MaxFeatures,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    bootstrap: bool,
    seed: u64,
}

impl ForestConfig {
    /// Create a config for `n_trees` trees.
    pub fn new(n_trees: usize) -> Result<Self, ForestError> {
        if n_trees == 0 {
            return Err(ForestError::InvalidTreeCount { n_trees });
        }
        Ok(Self {
            n_trees,
            max_features: MaxFeatures::Sqrt,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: true,
            seed: 42,
        })
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// `None` grows each tree until its leaves are pure.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Disable to train every tree on the full training set.
    #[must_use]
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    pub fn max_features(&self) -> MaxFeatures {
        self.max_features
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Check the tree-shape parameters.
    pub fn validate(&self) -> Result<(), ForestError> {
        if self.max_depth == Some(0) {
            return Err(ForestError::InvalidMaxDepth);
        }
        if self.min_samples_split < 2 {
            return Err(ForestError::InvalidMinSamplesSplit {
                min_samples_split: self.min_samples_split,
            });
        }
        if self.min_samples_leaf == 0 {
            return Err(ForestError::InvalidMinSamplesLeaf {
                min_samples_leaf: self.min_samples_leaf,
            });
        }
        Ok(())
    }

    /// Fit a forest on row-major `features` with zero-based class `labels`.
    ///
    /// `n_classes` fixes the width of every probability vector, so a class
    /// absent from this particular training set still gets a slot.
    pub fn fit(
        &self,
        features: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
    ) -> Result<RandomForest, ForestError> {
        fit_forest(self, features, labels, n_classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_resolves_with_floor() {
        assert_eq!(MaxFeatures::Sqrt.resolve(2).unwrap(), 1);
        assert_eq!(MaxFeatures::Sqrt.resolve(9).unwrap(), 3);
        assert_eq!(MaxFeatures::Sqrt.resolve(15).unwrap(), 3);
    }

    #[test]
    fn test_log2_never_below_one() {
        assert_eq!(MaxFeatures::Log2.resolve(1).unwrap(), 1);
        assert_eq!(MaxFeatures::Log2.resolve(8).unwrap(), 3);
    }

    #[test]
    fn test_fixed_out_of_range() {
        let err = MaxFeatures::Fixed(5).resolve(3).unwrap_err();
        assert_eq!(
            err,
            ForestError::InvalidMaxFeatures {
                max_features: 5,
                n_features: 3
            }
        );
        assert!(MaxFeatures::Fixed(0).resolve(3).is_err());
    }

    #[test]
    fn test_zero_trees_rejected() {
        assert_eq!(
            ForestConfig::new(0).unwrap_err(),
            ForestError::InvalidTreeCount { n_trees: 0 }
        );
    }

    #[test]
    fn test_defaults() {
        let config = ForestConfig::new(100).unwrap();
        assert_eq!(config.n_trees(), 100);
        assert_eq!(config.seed(), 42);
        assert_eq!(config.max_features(), MaxFeatures::Sqrt);
        assert!(config.bootstrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_shape_parameters() {
        let base = ForestConfig::new(1).unwrap();
        assert_eq!(
            base.clone().with_max_depth(Some(0)).validate().unwrap_err(),
            ForestError::InvalidMaxDepth
        );
        assert!(base.clone().with_min_samples_split(1).validate().is_err());
        assert!(base.with_min_samples_leaf(0).validate().is_err());
    }
}
