//! Terminal styling for progress output on stderr
//!
//! stdout is reserved for the classification report, so every decoration
//! here goes to stderr and can be switched off with [`set_quiet`].

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use console::{style, Emoji};

use crate::pipeline::TrainingConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static TREE: Emoji<'_, '_> = Emoji("🌲 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress (or re-enable) all decorative output
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

macro_rules! say {
    ($($arg:tt)*) => {
        if !is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print the application banner
pub fn print_banner(version: &str) {
    say!();
    say!(
        "    {} {}",
        style("fraud-trainer").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    say!(
        "    {}",
        style("Random-forest training for transaction fraud labels").dim()
    );
    say!("    {}", style("━".repeat(50)).dim());
    say!();
}

/// Print configuration card
pub fn print_config(input: &Path, output: &Path, config: &TrainingConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    say!("    ┌{}┐", line);
    say!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    say!("    ├{}┤", line);
    say!("    │  {} Input:  {:<39}│", FOLDER, truncate_path(input, 38));
    say!(
        "    │  {} Target: {:<39}│",
        TARGET,
        truncate_string(&config.target, 38)
    );
    say!("    │  {} Output: {:<39}│", SAVE, truncate_path(output, 38));
    say!("    ├{}┤", line);
    say!(
        "    │  {} Trees / test size:  {:<27}│",
        TREE,
        style(format!("{} / {:.2}", config.n_trees, config.test_size)).yellow()
    );
    say!(
        "    │  {} Split / forest seed: {:<26}│",
        DICE,
        style(format!("{} / {}", config.split_seed, config.forest_seed)).yellow()
    );
    say!("    └{}┘", line);
    say!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    say!();
    say!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    say!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    say!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    say!("    {} {}", INFO, message);
}

/// Print how long a step took
pub fn print_step_time(seconds: f64) {
    say!("    {}", style(format!("⏱  {:.2}s", seconds)).dim());
}

/// Print the final completion message
pub fn print_completion() {
    say!();
    say!("    {} {}", ROCKET, style("Training complete!").green().bold());
    say!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(detail) = detail {
        say!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(detail).dim()
        );
    } else {
        say!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}
