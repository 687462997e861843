//! fraud-trainer: train a random-forest fraud classifier
//!
//! Loads a transactions CSV, fills missing values, holds out a test split,
//! fits the forest, prints the classification report on stdout, and writes
//! the model artifact.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use fraud_trainer::cli::{run_evaluate, Cli, Commands};
use fraud_trainer::pipeline::{
    artifact_size, count_missing, estimated_size_mb, fill_missing, load_data_with_schema_length,
    preprocess_with_target, save_model, train_model,
};
use fraud_trainer::report::{export_report_json, ExportParams, TrainingSummary};
use fraud_trainer::utils::{
    create_spinner, finish_with_success, is_quiet, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, set_quiet,
};

/// Number of features listed in the summary card
const TOP_FEATURES: usize = 5;

fn init_tracing(verbose: bool) {
    let default = if verbose { "fraud_trainer=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    set_quiet(cli.quiet);

    if let Some(command) = &cli.command {
        return match command {
            Commands::Evaluate {
                model,
                input,
                infer_schema_length,
            } => run_evaluate(model, input, *infer_schema_length),
        };
    }

    let config = cli.training_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &cli.output, &config);

    // Step 1: Load dataset
    print_step_header(1, "Load Data");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV...");
    let mut df = load_data_with_schema_length(&cli.input, cli.infer_schema_length)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    finish_with_success(&spinner, "Dataset loaded");

    if !is_quiet() {
        eprintln!("\n    {} Dataset Statistics:", style("✧").cyan());
        eprintln!("      Rows: {}", df.height());
        eprintln!("      Columns: {}", df.width());
        eprintln!("      Estimated memory: {:.2} MB", estimated_size_mb(&df));
    }
    let load_elapsed = step_start.elapsed().as_secs_f64();
    print_step_time(load_elapsed);

    // Step 2: Fill missing values and separate the label
    print_step_header(2, "Preprocess");
    let step_start = Instant::now();
    let spinner = create_spinner("Filling missing values...");
    let missing: Vec<(String, usize)> = count_missing(&df)
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect();
    let filled = fill_missing(&mut df)?;
    finish_with_success(&spinner, "Missing values filled");

    if filled == 0 {
        print_info("No missing values found");
    } else {
        print_count("missing cell(s)", filled, Some("(filled with 0)"));
        for (column, n) in &missing {
            print_info(&format!("{}: {} filled", column, n));
        }
    }
    let (features, labels) = preprocess_with_target(&mut df, &config.target)?;
    print_success(&format!(
        "{} feature(s), {} label classes",
        features.n_features(),
        labels.classes().len()
    ));
    let preprocess_elapsed = step_start.elapsed().as_secs_f64();
    print_step_time(preprocess_elapsed);

    let mut summary = TrainingSummary::new(features.n_rows(), features.n_features());
    summary.missing_filled = filled;
    summary.record_stage("Load", load_elapsed);
    summary.record_stage("Preprocess", preprocess_elapsed);

    // Step 3: Train and evaluate
    print_step_header(3, "Train Random Forest");
    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Fitting {} trees...", config.n_trees));
    let outcome = train_model(&features, &labels, &config)?;
    finish_with_success(&spinner, "Forest trained");
    let train_elapsed = step_start.elapsed().as_secs_f64();
    print_step_time(train_elapsed);
    summary.record_stage("Train", train_elapsed);

    print!("{}", outcome.report());

    summary.train_rows = outcome.split().x_train.n_rows();
    summary.test_rows = outcome.split().x_test.n_rows();
    summary.n_trees = outcome.model().forest().n_trees();
    summary.accuracy = outcome.report().accuracy;
    let importances = outcome.model().ranked_importances();
    summary.top_features = importances.iter().take(TOP_FEATURES).cloned().collect();

    let trees = outcome.model().forest().trees();
    summary.mean_depth =
        trees.iter().map(|t| t.depth() as f64).sum::<f64>() / trees.len().max(1) as f64;
    summary.mean_leaves =
        trees.iter().map(|t| t.n_leaves() as f64).sum::<f64>() / trees.len().max(1) as f64;

    // Step 4: Save model
    print_step_header(4, "Save Model");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing model artifact...");
    save_model(outcome.model(), &cli.output)
        .with_context(|| format!("Failed to save model to {}", cli.output.display()))?;
    finish_with_success(&spinner, &format!("Saved to {}", cli.output.display()));
    let save_elapsed = step_start.elapsed().as_secs_f64();
    print_step_time(save_elapsed);
    summary.record_stage("Save", save_elapsed);
    summary.artifact_bytes = artifact_size(&cli.output)?;

    // Only written once the model is on disk
    if let Some(json_path) = &cli.report_json {
        export_report_json(
            outcome.report(),
            json_path,
            &ExportParams {
                input_file: &cli.input.display().to_string(),
                model_file: &cli.output.display().to_string(),
                config: &config,
                importances: &importances,
            },
        )?;
        print_info(&format!("Report exported to {}", json_path.display()));
    }

    if !is_quiet() {
        summary.display();
    }
    print_completion();

    Ok(())
}
