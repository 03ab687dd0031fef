//! Cross-validated evaluation of sentiment classifiers.
//!
//! - [`FoldStats`]: confusion counts for one held-out fold
//! - [`MetricSummary`]: mean/min/max of one metric across folds
//! - [`CrossValidationReport`]: everything reported for one classifier run
//! - [`CrossValidator`]: trains and scores classifiers fold by fold

pub mod cross_validation;
pub mod report;
pub mod stats;

pub use cross_validation::{CrossValidator, evaluate_fold};
pub use report::{CrossValidationReport, MetricSummary, round_to};
pub use stats::FoldStats;
