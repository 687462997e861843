//! Split, fit, and evaluate in one step

use tracing::{info, instrument};

use crate::report::ClassificationReport;

use super::config::TrainingConfig;
use super::error::PipelineError;
use super::model::FraudModel;
use super::preprocess::FeatureMatrix;
use super::split::{train_test_split, SplitDatasets};
use super::target::LabelVector;

/// Everything a training run produces
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    model: FraudModel,
    report: ClassificationReport,
    split: SplitDatasets,
    predictions: Vec<usize>,
}

impl TrainingOutcome {
    pub fn model(&self) -> &FraudModel {
        &self.model
    }

    pub fn report(&self) -> &ClassificationReport {
        &self.report
    }

    pub fn split(&self) -> &SplitDatasets {
        &self.split
    }

    /// Predicted class index for every held-out row
    pub fn predictions(&self) -> &[usize] {
        &self.predictions
    }

    pub fn into_model(self) -> FraudModel {
        self.model
    }
}

fn require_two_classes(labels: &LabelVector, context: &'static str) -> Result<(), PipelineError> {
    let found = labels.n_distinct();
    if found < 2 {
        return Err(PipelineError::InsufficientClasses { context, found });
    }
    Ok(())
}

/// Hold out a test partition, fit the forest on the rest, and score the
/// held-out rows.
#[instrument(skip_all, fields(n_rows = features.n_rows(), n_trees = config.n_trees))]
pub fn train_model(
    features: &FeatureMatrix,
    labels: &LabelVector,
    config: &TrainingConfig,
) -> Result<TrainingOutcome, PipelineError> {
    if features.n_rows() != labels.len() {
        return Err(PipelineError::RowCountMismatch {
            features: features.n_rows(),
            labels: labels.len(),
        });
    }
    require_two_classes(labels, "label column")?;

    let split = train_test_split(features, labels, config.test_size, config.split_seed)?;
    require_two_classes(&split.y_train, "training subset")?;
    info!(
        n_train = split.x_train.n_rows(),
        n_test = split.x_test.n_rows(),
        "partitioned rows"
    );

    let forest = config.forest_config()?.fit(
        split.x_train.rows(),
        split.y_train.values(),
        labels.classes().len(),
    )?;

    let model = FraudModel::new(
        forest,
        features.names().to_vec(),
        features.encodings().to_vec(),
        config.target.clone(),
        labels.classes().to_vec(),
    );

    let predictions = model.predict(&split.x_test)?;
    let report = ClassificationReport::from_predictions(
        split.y_test.values(),
        &predictions,
        labels.classes(),
    );
    info!(accuracy = report.accuracy, "evaluated held-out rows");

    Ok(TrainingOutcome {
        model,
        report,
        split,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable(n: usize) -> (FeatureMatrix, LabelVector) {
        let rows = (0..n).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let features = FeatureMatrix::new(vec!["amount".into(), "noise".into()], rows).unwrap();
        let values = (0..n).map(|i| usize::from(i >= n / 2)).collect();
        let labels = LabelVector::new(values, vec!["0".into(), "1".into()]).unwrap();
        (features, labels)
    }

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            n_trees: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_train_model_learns_separable_data() {
        let (x, y) = separable(60);
        let outcome = train_model(&x, &y, &small_config()).unwrap();

        assert_eq!(outcome.predictions().len(), 12);
        assert_eq!(outcome.model().forest().n_trees(), 10);
        assert!(outcome.report().accuracy >= 0.8);
        assert_eq!(outcome.report().classes.len(), 2);
    }

    #[test]
    fn test_training_is_deterministic() {
        let (x, y) = separable(40);
        let a = train_model(&x, &y, &small_config()).unwrap();
        let b = train_model(&x, &y, &small_config()).unwrap();
        assert_eq!(a.model(), b.model());
        assert_eq!(a.predictions(), b.predictions());
    }

    #[test]
    fn test_single_class_rejected() {
        let (x, _) = separable(10);
        let y = LabelVector::new(vec![0; 10], vec!["0".into(), "1".into()]).unwrap();
        let err = train_model(&x, &y, &small_config()).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientClasses { found: 1, .. }));
    }

    #[test]
    fn test_row_mismatch_rejected() {
        let (x, _) = separable(10);
        let y = LabelVector::new(vec![0, 1], vec!["0".into(), "1".into()]).unwrap();
        let err = train_model(&x, &y, &small_config()).unwrap_err();
        assert!(matches!(err, PipelineError::RowCountMismatch { .. }));
    }
}
