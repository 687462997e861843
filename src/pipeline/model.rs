//! Trained fraud classifier with the schema it was fitted on

use serde::{Deserialize, Serialize};

use crate::forest::RandomForest;

use super::error::PipelineError;
use super::preprocess::{FeatureEncoding, FeatureMatrix};

/// A fitted forest plus everything needed to score new rows the same way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudModel {
    forest: RandomForest,
    feature_names: Vec<String>,
    encodings: Vec<FeatureEncoding>,
    target: String,
    class_names: Vec<String>,
}

impl FraudModel {
    pub fn new(
        forest: RandomForest,
        feature_names: Vec<String>,
        encodings: Vec<FeatureEncoding>,
        target: String,
        class_names: Vec<String>,
    ) -> Self {
        Self {
            forest,
            feature_names,
            encodings,
            target,
            class_names,
        }
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn encodings(&self) -> &[FeatureEncoding] {
        &self.encodings
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Predict a class index for every row of `features`
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<usize>, PipelineError> {
        if features.names() != self.feature_names.as_slice() {
            return Err(PipelineError::UnusableColumn {
                column: features.names().join(","),
                reason: format!("model expects features {:?}", self.feature_names),
            });
        }
        Ok(self.forest.predict_batch(features.rows())?)
    }

    /// Feature names paired with mean-decrease-in-impurity importance,
    /// highest first
    pub fn ranked_importances(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .feature_names
            .iter()
            .cloned()
            .zip(self.forest.feature_importances())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}
