//! # Verdict
//!
//! Sentiment classification of movie reviews, evaluated with k-fold
//! cross-validation.
//!
//! ## Features
//!
//! - Bag-of-words documents with log-normalized term frequency and TF-IDF
//! - Perceptron, Naive Bayes, K-nearest-neighbours and Rocchio classifiers
//! - Seedable k-fold partitioning, optionally evaluated in parallel
//! - Mean/min/max precision, recall and accuracy across folds
//!
//! ## Example
//!
//! ```
//! use verdict::classifier::ClassifierConfig;
//! use verdict::corpus::Corpus;
//! use verdict::document::{Document, FeatureMode, Sentiment};
//! use verdict::evaluation::CrossValidator;
//! use verdict::fold::FoldPartitioner;
//!
//! let reviews = [
//!     ("good great excellent", Sentiment::Positive),
//!     ("amazing wonderful", Sentiment::Positive),
//!     ("bad terrible awful", Sentiment::Negative),
//!     ("poor weak", Sentiment::Negative),
//! ];
//! let documents = reviews
//!     .iter()
//!     .enumerate()
//!     .map(|(i, (text, label))| Document::from_text(format!("r{i}"), text, *label, false).unwrap())
//!     .collect();
//! let corpus = Corpus::from_documents(documents);
//!
//! let validator = CrossValidator::new(FoldPartitioner::new(2).unwrap().with_seed(1))
//!     .with_feature_mode(FeatureMode::RawFrequency);
//! let report = validator.run(&ClassifierConfig::NaiveBayes, &corpus).unwrap();
//! assert_eq!(report.total_evaluated, 4);
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod fold;

pub mod prelude {
    pub use crate::classifier::{ClassifierConfig, DistanceMetric, SentimentClassifier};
    pub use crate::config::ExperimentConfig;
    pub use crate::corpus::Corpus;
    pub use crate::document::{Document, FeatureMode, Sentiment};
    pub use crate::error::{Result, VerdictError};
    pub use crate::evaluation::{CrossValidationReport, CrossValidator, FoldStats};
    pub use crate::fold::FoldPartitioner;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
