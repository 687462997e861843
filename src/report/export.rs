//! JSON export of the classification report

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::classification::ClassificationReport;
use crate::pipeline::TrainingConfig;

/// Metadata about the training run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// fraud-trainer version
    pub version: String,
    pub input_file: String,
    pub model_file: String,
    pub config: TrainingConfig,
}

/// One feature's importance in the fitted forest
#[derive(Serialize)]
pub struct ImportanceEntry {
    pub feature: String,
    pub importance: f64,
}

/// Complete report export
#[derive(Serialize)]
pub struct ReportExport<'a> {
    pub metadata: RunMetadata,
    pub report: &'a ClassificationReport,
    pub feature_importances: Vec<ImportanceEntry>,
}

/// Parameters for the report export
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub model_file: &'a str,
    pub config: &'a TrainingConfig,
    pub importances: &'a [(String, f64)],
}

/// Write the report and run metadata to `output_path` as pretty JSON
pub fn export_report_json(
    report: &ClassificationReport,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = ReportExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            model_file: params.model_file.to_string(),
            config: params.config.clone(),
        },
        report,
        feature_importances: params
            .importances
            .iter()
            .map(|(feature, importance)| ImportanceEntry {
                feature: feature.clone(),
                importance: *importance,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize classification report to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write classification report to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
