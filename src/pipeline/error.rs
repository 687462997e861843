//! Error taxonomy for the training pipeline.
//!
//! Nothing in the pipeline catches or retries these; every variant
//! propagates to the process boundary.

use std::path::PathBuf;

use polars::prelude::PolarsError;

use crate::forest::ForestError;

/// Coarse classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A path is missing, unreadable, or unwritable.
    FileAccess,
    /// Input content is not valid delimited tabular data.
    Parse,
    /// An expected column is missing or unusable.
    Schema,
    /// Data is unsuitable for training or evaluation.
    Value,
    /// A model artifact could not be encoded or decoded.
    ModelFormat,
}

/// Errors raised by the loader, preprocessor, trainer, and persister.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot access '{}'", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{}' as CSV", path.display())]
    Parse { path: PathBuf, source: PolarsError },

    #[error("column '{column}' not found in dataset. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("column '{column}' cannot be used as a feature: {reason}")]
    UnusableColumn { column: String, reason: String },

    /// A table operation failed after the file was parsed
    #[error("dataframe operation failed")]
    Frame(#[from] PolarsError),

    #[error("feature matrix has {features} rows but label vector has {labels}")]
    RowCountMismatch { features: usize, labels: usize },

    #[error("{context} must contain at least two distinct classes, found {found}")]
    InsufficientClasses { context: &'static str, found: usize },

    #[error("test_size must be in (0, 1), got {test_size}")]
    InvalidTestSize { test_size: f64 },

    #[error("splitting {n_rows} rows with test_size {test_size} leaves an empty partition")]
    EmptySplit { n_rows: usize, test_size: f64 },

    #[error("label '{value}' was not seen during training (known: {known:?})")]
    UnknownLabel { value: String, known: Vec<String> },

    #[error("{0}")]
    InvalidInput(String),

    #[error("model fitting failed")]
    Forest(#[from] ForestError),

    #[error("model artifact '{}' is malformed", path.display())]
    ModelFormat {
        path: PathBuf,
        source: bincode::Error,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::FileAccess { .. } => ErrorKind::FileAccess,
            PipelineError::Parse { .. } => ErrorKind::Parse,
            PipelineError::MissingColumn { .. } | PipelineError::UnusableColumn { .. } => {
                ErrorKind::Schema
            }
            PipelineError::RowCountMismatch { .. }
            | PipelineError::InsufficientClasses { .. }
            | PipelineError::InvalidTestSize { .. }
            | PipelineError::EmptySplit { .. }
            | PipelineError::UnknownLabel { .. }
            | PipelineError::InvalidInput(_)
            | PipelineError::Frame(_)
            | PipelineError::Forest(_) => ErrorKind::Value,
            PipelineError::ModelFormat { .. } => ErrorKind::ModelFormat,
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
