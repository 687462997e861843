//! Error types for the random-forest engine.

/// Errors from forest configuration, fitting, and prediction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForestError {
    /// Returned when `n_trees` is zero.
    #[error("n_trees must be at least 1, got {n_trees}")]
    InvalidTreeCount { n_trees: usize },

    /// Returned when `max_depth` is `Some(0)`.
    #[error("max_depth must be at least 1 when set")]
    InvalidMaxDepth,

    /// Returned when `min_samples_split` is below 2.
    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit { min_samples_split: usize },

    /// Returned when `min_samples_leaf` is zero.
    #[error("min_samples_leaf must be at least 1, got {min_samples_leaf}")]
    InvalidMinSamplesLeaf { min_samples_leaf: usize },

    /// Returned when `max_features` resolves outside `[1, n_features]`.
    #[error("max_features resolved to {max_features}, but must be in [1, {n_features}]")]
    InvalidMaxFeatures {
        max_features: usize,
        n_features: usize,
    },

    /// Returned when the training set has no samples.
    #[error("training data has zero samples")]
    EmptyDataset,

    /// Returned when the training rows have no feature columns.
    #[error("training data has zero feature columns")]
    ZeroFeatures,

    /// Returned when rows have inconsistent widths.
    #[error("sample {sample_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        expected: usize,
        got: usize,
        sample_index: usize,
    },

    /// Returned when the label slice does not match the sample count.
    #[error("{n_labels} labels supplied for {n_samples} samples")]
    LabelCountMismatch { n_samples: usize, n_labels: usize },

    /// Returned when a label is not a valid class index.
    #[error("label {label} at sample {sample_index} is outside 0..{n_classes}")]
    LabelOutOfRange {
        label: usize,
        sample_index: usize,
        n_classes: usize,
    },

    /// Returned when a training value is NaN or infinite.
    #[error("non-finite value at sample {sample_index}, feature {feature_index}")]
    NonFiniteValue {
        sample_index: usize,
        feature_index: usize,
    },

    /// Returned when a prediction input has the wrong width.
    #[error("prediction input has {got} features, expected {expected}")]
    PredictionFeatureMismatch { expected: usize, got: usize },
}
