//! Training summary card

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one training run
#[derive(Debug, Default)]
pub struct TrainingSummary {
    pub rows: usize,
    pub features: usize,
    pub missing_filled: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub n_trees: usize,
    pub mean_depth: f64,
    pub mean_leaves: f64,
    pub accuracy: f64,
    pub artifact_bytes: u64,
    /// (stage name, seconds)
    pub timings: Vec<(String, f64)>,
    /// Highest-importance features, already ranked
    pub top_features: Vec<(String, f64)>,
}

impl TrainingSummary {
    pub fn new(rows: usize, features: usize) -> Self {
        Self {
            rows,
            features,
            ..Default::default()
        }
    }

    pub fn record_stage(&mut self, name: &str, seconds: f64) {
        self.timings.push((name.to_string(), seconds));
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![Cell::new("🔢 Features"), Cell::new(self.features)]);
        table.add_row(vec![
            Cell::new("🩹 Cells Filled"),
            Cell::new(self.missing_filled).fg(if self.missing_filled == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("✂️  Train / Test"),
            Cell::new(format!("{} / {}", self.train_rows, self.test_rows)),
        ]);
        table.add_row(vec![Cell::new("🌲 Trees"), Cell::new(self.n_trees)]);
        table.add_row(vec![
            Cell::new("🌳 Mean Depth / Leaves"),
            Cell::new(format!("{:.1} / {:.1}", self.mean_depth, self.mean_leaves)),
        ]);

        let color = if self.accuracy >= 0.9 {
            Color::Green
        } else if self.accuracy >= 0.7 {
            Color::Yellow
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("🎯 Held-out Accuracy"),
            Cell::new(format!("{:.1}%", self.accuracy * 100.0))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("💾 Artifact Size"),
            Cell::new(format!("{:.1} KB", self.artifact_bytes as f64 / 1024.0)),
        ]);

        for (stage, seconds) in &self.timings {
            table.add_row(vec![
                Cell::new(format!("⏱  {}", stage)),
                Cell::new(format!("{:.2}s", seconds)),
            ]);
        }
        table
    }

    /// Print the card to stderr
    pub fn display(&self) {
        eprintln!();
        eprintln!(
            "    {} {}",
            style("📋").cyan(),
            style("TRAINING SUMMARY").white().bold()
        );
        eprintln!("    {}", style("─".repeat(50)).dim());
        eprintln!();

        // Indent the table
        for line in self.table().to_string().lines() {
            eprintln!("    {}", line);
        }

        if !self.top_features.is_empty() {
            eprintln!();
            eprintln!(
                "    {} {}",
                style("📝").cyan(),
                style("TOP FEATURES").white().bold()
            );
            eprintln!("    {}", style("─".repeat(50)).dim());
            for (name, importance) in &self.top_features {
                eprintln!(
                    "      {} {:<30} {}",
                    style("•").dim(),
                    name,
                    style(format!("{:.4}", importance)).yellow()
                );
            }
        }
    }
}
