//! Score a labelled CSV with a saved model

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{
    extract_features_with, extract_labels_with_classes, fill_missing, get_column_names,
    load_data_with_schema_length, load_model, FraudModel, PipelineError,
};
use crate::report::ClassificationReport;
use crate::utils::{create_spinner, finish_with_success, is_quiet};

/// Predict every row of `input` and build the classification report
pub fn evaluate_file(
    model: &FraudModel,
    input: &Path,
    infer_schema_length: usize,
) -> Result<ClassificationReport> {
    check_header(model, input)?;

    let mut df = load_data_with_schema_length(input, infer_schema_length)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    fill_missing(&mut df)?;

    let features = extract_features_with(&df, model.feature_names(), model.encodings())?;
    let labels = extract_labels_with_classes(&df, model.target(), model.class_names())?;
    let predictions = model.predict(&features)?;

    Ok(ClassificationReport::from_predictions(
        labels.values(),
        &predictions,
        model.class_names(),
    ))
}

/// Fail before loading rows when a column the model needs is absent
fn check_header(model: &FraudModel, input: &Path) -> Result<(), PipelineError> {
    let available = get_column_names(input)?;
    let required = model
        .feature_names()
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(model.target()));

    for column in required {
        if !available.iter().any(|name| name == column) {
            return Err(PipelineError::MissingColumn {
                column: column.to_string(),
                available,
            });
        }
    }
    Ok(())
}

/// Run the `evaluate` subcommand, printing the report to stdout
pub fn run_evaluate(model_path: &Path, input: &Path, infer_schema_length: usize) -> Result<()> {
    if !is_quiet() {
        eprintln!("\n {} Evaluating saved model", style("◆").cyan().bold());
        eprintln!("   Model: {}", style(model_path.display()).dim());
        eprintln!("   Input: {}", style(input.display()).dim());
        eprintln!();
    }

    let spinner = create_spinner("Loading model...");
    let model = load_model(model_path)
        .with_context(|| format!("Failed to load model {}", model_path.display()))?;
    finish_with_success(
        &spinner,
        &format!(
            "Model loaded ({} trees, {} features)",
            model.forest().n_trees(),
            model.feature_names().len()
        ),
    );

    let spinner = create_spinner("Scoring rows...");
    let report = evaluate_file(&model, input, infer_schema_length)?;
    let scored: usize = report.macro_avg.support;
    finish_with_success(&spinner, &format!("Scored {} rows", scored));

    print!("{}", report);
    Ok(())
}
