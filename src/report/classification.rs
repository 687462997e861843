//! Per-class precision/recall/F1 report

use std::fmt;

use serde::Serialize;

/// Metrics for one class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Averaged metrics across classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Classification report over one set of predictions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Build the report from true and predicted class indices.
    ///
    /// Every entry of `class_names` gets a row, including classes with no
    /// support. Undefined ratios are reported as 0.
    pub fn from_predictions(y_true: &[usize], y_pred: &[usize], class_names: &[String]) -> Self {
        let n_classes = class_names.len();
        let mut tp = vec![0usize; n_classes];
        let mut predicted = vec![0usize; n_classes];
        let mut actual = vec![0usize; n_classes];

        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t < n_classes {
                actual[t] += 1;
            }
            if p < n_classes {
                predicted[p] += 1;
            }
            if t == p && t < n_classes {
                tp[t] += 1;
            }
        }

        let classes: Vec<ClassMetrics> = class_names
            .iter()
            .enumerate()
            .map(|(c, label)| {
                let precision = ratio(tp[c], predicted[c]);
                let recall = ratio(tp[c], actual[c]);
                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support: actual[c],
                }
            })
            .collect();

        let total = y_true.len().min(y_pred.len());
        let correct: usize = tp.iter().sum();
        let accuracy = ratio(correct, total);

        let support: usize = classes.iter().map(|c| c.support).sum();
        let mean = |f: fn(&ClassMetrics) -> f64| {
            if classes.is_empty() {
                0.0
            } else {
                classes.iter().map(f).sum::<f64>() / classes.len() as f64
            }
        };
        let weighted = |f: fn(&ClassMetrics) -> f64| {
            if support == 0 {
                0.0
            } else {
                classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>() / support as f64
            }
        };

        let macro_avg = AverageMetrics {
            precision: mean(|c| c.precision),
            recall: mean(|c| c.recall),
            f1_score: mean(|c| c.f1_score),
            support,
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1_score: weighted(|c| c.f1_score),
            support,
        };

        Self {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(12);

        write!(f, "{:>w$} ", "", w = width)?;
        for header in ["precision", "recall", "f1-score", "support"] {
            write!(f, " {:>9}", header)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        for c in &self.classes {
            writeln!(
                f,
                "{:>w$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label,
                c.precision,
                c.recall,
                c.f1_score,
                c.support,
                w = width
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>w$}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.macro_avg.support,
            w = width
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>w$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name,
                avg.precision,
                avg.recall,
                avg.f1_score,
                avg.support,
                w = width
            )?;
        }
        Ok(())
    }
}
