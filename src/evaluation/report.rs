//! Aggregation of fold results into a per-classifier report.
//!
//! The "X / N correct" line counts only documents that were tested. When the
//! corpus size is not a multiple of the fold count, the remainder is never
//! tested, so N is `k·floor(len / k)` rather than the corpus size.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::evaluation::stats::FoldStats;

/// Decimal places used when reporting metrics.
pub const REPORT_DECIMALS: i32 = 2;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Mean, minimum and maximum of one metric across folds.
///
/// Undefined (NaN) fold values are left out; every field is `None` when no
/// fold produced a defined value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MetricSummary {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let defined: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if defined.is_empty() {
            return Self::default();
        }

        let mean = defined.iter().sum::<f64>() / defined.len() as f64;
        let min = defined.iter().copied().fold(f64::INFINITY, f64::min);
        let max = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean: Some(mean),
            min: Some(min),
            max: Some(max),
        }
    }

    /// Copy with every value rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            mean: self.mean.map(|v| round_to(v, decimals)),
            min: self.min.map(|v| round_to(v, decimals)),
            max: self.max.map(|v| round_to(v, decimals)),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.mean.is_some()
    }
}

/// Results of cross-validating one classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    /// Display name, e.g. "K-NN".
    pub classifier: String,
    /// Name with parameters, e.g. "K-NN (K = 5, euclidean distance)".
    pub description: String,
    pub total_correct: u64,
    pub total_evaluated: u64,
    /// Metric summaries, rounded for reporting.
    pub precision: MetricSummary,
    pub recall: MetricSummary,
    pub accuracy: MetricSummary,
    /// Raw counts of every fold, in fold order.
    pub folds: Vec<FoldStats>,
}

impl CrossValidationReport {
    pub fn from_folds(
        classifier: impl Into<String>,
        description: impl Into<String>,
        folds: Vec<FoldStats>,
    ) -> Self {
        let classifier = classifier.into();

        let degenerate = folds.iter().filter(|f| f.is_degenerate()).count();
        if degenerate > 0 {
            warn!(
                "{classifier}: {degenerate} of {} folds have undefined metrics and are left out of them",
                folds.len()
            );
        }

        let summary = |metric: fn(&FoldStats) -> f64| {
            MetricSummary::from_values(folds.iter().map(metric)).rounded(REPORT_DECIMALS)
        };

        Self {
            description: description.into(),
            total_correct: folds.iter().map(FoldStats::total_true).sum(),
            total_evaluated: folds.iter().map(FoldStats::total).sum(),
            precision: summary(FoldStats::precision),
            recall: summary(FoldStats::recall),
            accuracy: summary(FoldStats::accuracy),
            classifier,
            folds,
        }
    }

    pub fn fold_count(&self) -> usize {
        self.folds.len()
    }
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for CrossValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.classifier;
        writeln!(
            f,
            "{name}: {} / {} correct.",
            self.total_correct, self.total_evaluated
        )?;

        let sections: [(&str, fn(&MetricSummary) -> Option<f64>); 3] = [
            ("Average", |s| s.mean),
            ("Minimum", |s| s.min),
            ("Maximum", |s| s.max),
        ];
        for (i, (label, pick)) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{label} {name} stats:")?;
            writeln!(f, "{label} {name} precision: {}", format_metric(pick(&self.precision)))?;
            writeln!(f, "{label} {name} recall: {}", format_metric(pick(&self.recall)))?;
            writeln!(f, "{label} {name} accuracy: {}", format_metric(pick(&self.accuracy)))?;
        }
        Ok(())
    }
}
