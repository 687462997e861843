//! Label column extraction
//!
//! Turns the target column into zero-based class indices. Class names are
//! the column's distinct values rendered as text, ordered numerically when
//! every value is a number (so `0` sorts before `1`) and lexically
//! otherwise.

use std::cmp::Ordering;

use polars::prelude::*;

use super::error::PipelineError;
use super::missing::MISSING_TEXT_FILL;

/// Class labels aligned by row with the feature matrix
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVector {
    values: Vec<usize>,
    classes: Vec<String>,
}

impl LabelVector {
    /// Build from class indices and class names
    pub fn new(values: Vec<usize>, classes: Vec<String>) -> Result<Self, PipelineError> {
        if let Some(&bad) = values.iter().find(|&&v| v >= classes.len()) {
            return Err(PipelineError::InvalidInput(format!(
                "label index {} is outside the {} known classes",
                bad,
                classes.len()
            )));
        }
        Ok(Self { values, classes })
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of classes that actually occur in this vector
    pub fn n_distinct(&self) -> usize {
        let mut seen = vec![false; self.classes.len()];
        for &v in &self.values {
            seen[v] = true;
        }
        seen.into_iter().filter(|&s| s).count()
    }

    /// Rows at `indices`, in that order, sharing the same class list
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            values: indices.iter().map(|&i| self.values[i]).collect(),
            classes: self.classes.clone(),
        }
    }
}

/// Look up the target column, reporting the available columns when absent
pub(crate) fn target_column<'a>(
    df: &'a DataFrame,
    target: &str,
) -> Result<&'a Column, PipelineError> {
    df.column(target).map_err(|_| PipelineError::MissingColumn {
        column: target.to_string(),
        available: df.get_column_names().iter().map(|s| s.to_string()).collect(),
    })
}

/// Extract labels, deriving the class list from the column itself
pub fn extract_labels(df: &DataFrame, target: &str) -> Result<LabelVector, PipelineError> {
    let texts = column_to_strings(target_column(df, target)?)?;
    let classes = ordered_classes(&texts);
    let values = texts
        .iter()
        .map(|t| classes.iter().position(|c| c == t).unwrap_or_default())
        .collect();
    LabelVector::new(values, classes)
}

/// Extract labels against a fixed class list (e.g. from a trained model)
pub fn extract_labels_with_classes(
    df: &DataFrame,
    target: &str,
    classes: &[String],
) -> Result<LabelVector, PipelineError> {
    let texts = column_to_strings(target_column(df, target)?)?;
    let values = texts
        .into_iter()
        .map(|t| {
            classes
                .iter()
                .position(|c| *c == t)
                .ok_or_else(|| PipelineError::UnknownLabel {
                    value: t,
                    known: classes.to_vec(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    LabelVector::new(values, classes.to_vec())
}

/// Distinct values, numerically ordered when they all parse as numbers
fn ordered_classes(texts: &[String]) -> Vec<String> {
    let mut classes: Vec<String> = texts.to_vec();
    classes.sort();
    classes.dedup();

    let numeric: Option<Vec<f64>> = classes.iter().map(|c| c.parse::<f64>().ok()).collect();
    if let Some(numbers) = numeric {
        let mut paired: Vec<(f64, String)> = numbers.into_iter().zip(classes).collect();
        paired.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        return paired.into_iter().map(|(_, c)| c).collect();
    }
    classes
}

/// Render every cell of a column as text; nulls become the zero fill value
fn column_to_strings(col: &Column) -> Result<Vec<String>, PipelineError> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| u8::from(b).to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or_else(|| MISSING_TEXT_FILL.to_string()))
        .collect())
}
