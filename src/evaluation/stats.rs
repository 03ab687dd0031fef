//! Per-fold confusion counts.

use serde::{Deserialize, Serialize};

use crate::document::Sentiment;

/// Confusion counts over one fold's predictions.
///
/// Every ratio returns NaN when its denominator is zero (for example a class
/// that is never predicted in the fold). Callers decide how to report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldStats {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}

impl FoldStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one prediction.
    pub fn record(&mut self, predicted: Sentiment, actual: Sentiment) {
        match (predicted, actual) {
            (Sentiment::Positive, Sentiment::Positive) => self.true_positives += 1,
            (Sentiment::Negative, Sentiment::Negative) => self.true_negatives += 1,
            (Sentiment::Positive, Sentiment::Negative) => self.false_positives += 1,
            (Sentiment::Negative, Sentiment::Positive) => self.false_negatives += 1,
        }
    }

    /// Correct predictions.
    pub fn total_true(&self) -> u64 {
        self.true_positives + self.true_negatives
    }

    pub fn total(&self) -> u64 {
        self.total_true() + self.false_positives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.total_true(), self.total())
    }

    pub fn positive_precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn positive_recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn negative_precision(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_negatives)
    }

    pub fn negative_recall(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }

    /// Mean of positive and negative precision.
    pub fn precision(&self) -> f64 {
        (self.positive_precision() + self.negative_precision()) / 2.0
    }

    /// Mean of positive and negative recall.
    pub fn recall(&self) -> f64 {
        (self.positive_recall() + self.negative_recall()) / 2.0
    }

    /// True when any of precision, recall or accuracy is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.precision().is_nan() || self.recall().is_nan() || self.accuracy().is_nan()
    }
}
