//! Feature/label separation
//!
//! Fills nulls, then turns every non-target column into an `f64` feature and
//! the target column into a [`LabelVector`].

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::DEFAULT_TARGET_COLUMN;
use super::error::PipelineError;
use super::missing::fill_missing;
use super::target::{extract_labels, target_column, LabelVector};

/// How a source column was mapped onto `f64`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureEncoding {
    /// Numbers (or booleans, or text that parses as numbers) used as-is
    Numeric,
    /// Text replaced by its index in the sorted list of distinct values
    Ordinal { categories: Vec<String> },
}

/// Row-major feature matrix with its column names
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    encodings: Vec<FeatureEncoding>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build a numeric matrix; every row must have one value per name
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, PipelineError> {
        let encodings = vec![FeatureEncoding::Numeric; names.len()];
        Self::with_encodings(names, encodings, rows)
    }

    fn with_encodings(
        names: Vec<String>,
        encodings: Vec<FeatureEncoding>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, PipelineError> {
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != names.len()) {
            return Err(PipelineError::InvalidInput(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                names.len()
            )));
        }
        Ok(Self {
            names,
            encodings,
            rows,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn encodings(&self) -> &[FeatureEncoding] {
        &self.encodings
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Values of one named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            encodings: self.encodings.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Fill nulls and split the default `is_fraud` target from the features
pub fn preprocess_data(
    df: &mut DataFrame,
) -> Result<(FeatureMatrix, LabelVector), PipelineError> {
    preprocess_with_target(df, DEFAULT_TARGET_COLUMN)
}

/// Fill nulls and split `target` from the features
pub fn preprocess_with_target(
    df: &mut DataFrame,
    target: &str,
) -> Result<(FeatureMatrix, LabelVector), PipelineError> {
    fill_missing(df)?;
    target_column(df, target)?;

    let features = extract_features(df, target)?;
    let labels = extract_labels(df, target)?;

    if features.n_rows() != labels.len() {
        return Err(PipelineError::RowCountMismatch {
            features: features.n_rows(),
            labels: labels.len(),
        });
    }
    Ok((features, labels))
}

/// Every column except `target`, in source order, with encodings derived
/// from the data
pub fn extract_features(df: &DataFrame, target: &str) -> Result<FeatureMatrix, PipelineError> {
    let mut names = Vec::new();
    let mut encodings = Vec::new();
    let mut columns = Vec::new();

    for col in df.get_columns() {
        if col.name().as_str() == target {
            continue;
        }
        let (encoding, values) = encode_column(col)?;
        names.push(col.name().to_string());
        encodings.push(encoding);
        columns.push(values);
    }

    FeatureMatrix::with_encodings(names, encodings, transpose(columns, df.height()))
}

/// Extract the named columns using encodings fixed at training time.
///
/// Ordinal values not seen during training map to one past the last known
/// category.
pub fn extract_features_with(
    df: &DataFrame,
    names: &[String],
    encodings: &[FeatureEncoding],
) -> Result<FeatureMatrix, PipelineError> {
    let available = || df.get_column_names().iter().map(|s| s.to_string()).collect();
    let mut columns = Vec::with_capacity(names.len());

    for (name, encoding) in names.iter().zip(encodings) {
        let col = df.column(name).map_err(|_| PipelineError::MissingColumn {
            column: name.clone(),
            available: available(),
        })?;
        let values = match encoding {
            FeatureEncoding::Numeric => numeric_values(col)?,
            FeatureEncoding::Ordinal { categories } => {
                let texts = text_values(col)?;
                ordinal_values(&texts, categories)
            }
        };
        columns.push(values);
    }

    FeatureMatrix::with_encodings(
        names.to_vec(),
        encodings.to_vec(),
        transpose(columns, df.height()),
    )
}

fn encode_column(col: &Column) -> Result<(FeatureEncoding, Vec<f64>), PipelineError> {
    match col.dtype() {
        DataType::String => {
            let texts = text_values(col)?;
            let parsed: Option<Vec<f64>> = texts
                .iter()
                .map(|t| t.trim().parse::<f64>().ok())
                .collect();
            match parsed {
                Some(values) => Ok((FeatureEncoding::Numeric, values)),
                None => {
                    let mut categories = texts.clone();
                    categories.sort();
                    categories.dedup();
                    let values = ordinal_values(&texts, &categories);
                    Ok((FeatureEncoding::Ordinal { categories }, values))
                }
            }
        }
        _ => Ok((FeatureEncoding::Numeric, numeric_values(col)?)),
    }
}

fn numeric_values(col: &Column) -> Result<Vec<f64>, PipelineError> {
    let dtype = col.dtype();
    if !(dtype.is_primitive_numeric()
        || matches!(dtype, DataType::Boolean | DataType::String | DataType::Null))
    {
        return Err(PipelineError::UnusableColumn {
            column: col.name().to_string(),
            reason: format!("unsupported dtype {}", dtype),
        });
    }

    if dtype == &DataType::String {
        let texts = text_values(col)?;
        return texts
            .iter()
            .map(|t| {
                t.trim().parse::<f64>().map_err(|_| PipelineError::UnusableColumn {
                    column: col.name().to_string(),
                    reason: format!("value '{}' is not numeric", t),
                })
            })
            .collect();
    }

    let cast = col.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect())
}

fn text_values(col: &Column) -> Result<Vec<String>, PipelineError> {
    let cast = col.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

fn ordinal_values(texts: &[String], categories: &[String]) -> Vec<f64> {
    texts
        .iter()
        .map(|t| {
            let idx = categories
                .binary_search(t)
                .unwrap_or(categories.len());
            idx as f64
        })
        .collect()
}

fn transpose(columns: Vec<Vec<f64>>, n_rows: usize) -> Vec<Vec<f64>> {
    (0..n_rows)
        .map(|r| columns.iter().map(|c| c[r]).collect())
        .collect()
}
