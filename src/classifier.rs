//! Sentiment classifiers.
//!
//! Four interchangeable strategies share the [`SentimentClassifier`] trait:
//!
//! - [`Perceptron`]: single-pass linear classifier
//! - [`NaiveBayes`]: multinomial Naive Bayes with optional TF-IDF likelihoods
//! - [`KNearestNeighbors`]: majority vote among the K closest training reviews
//! - [`Rocchio`]: nearest class centroid
//!
//! [`ClassifierConfig`] selects a strategy and its parameters, validates them,
//! and trains a fresh instance on a training set.
//!
//! # Example
//!
//! ```
//! use verdict::classifier::{ClassifierConfig, DistanceMetric};
//! use verdict::corpus::Corpus;
//! use verdict::document::{Document, FeatureMode, Sentiment};
//!
//! let corpus = Corpus::from_documents(vec![
//!     Document::from_text("p", "wonderful acting", Sentiment::Positive, false).unwrap(),
//!     Document::from_text("n", "terrible acting", Sentiment::Negative, false).unwrap(),
//! ]);
//!
//! let config = ClassifierConfig::Knn { k: 1, distance_metric: DistanceMetric::Manhattan };
//! let classifier = config.train(corpus.documents(), FeatureMode::RawFrequency).unwrap();
//!
//! let query = Document::from_text("q", "wonderful", Sentiment::Positive, false).unwrap();
//! assert_eq!(classifier.classify(&query), Sentiment::Positive);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::document::{Document, FeatureMode, Sentiment};
use crate::error::{Result, VerdictError};

pub mod knn;
pub mod naive_bayes;
pub mod perceptron;
pub mod rocchio;

pub use knn::KNearestNeighbors;
pub use naive_bayes::NaiveBayes;
pub use perceptron::Perceptron;
pub use rocchio::Rocchio;

/// Default perceptron learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.15;

/// Default number of neighbours for KNN.
pub const DEFAULT_K: usize = 5;

/// A trained sentiment classifier.
///
/// Classifiers only read the documents they are given.
pub trait SentimentClassifier: Send + Sync {
    /// Predict the sentiment of a review.
    fn classify(&self, document: &Document) -> Sentiment;

    /// Get the name of this classifier for reporting and logging.
    fn name(&self) -> &str;
}

/// Distance used by KNN and Rocchio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
}

impl DistanceMetric {
    /// Distance between `query` and another vector, summed over the query's
    /// own terms only. Terms present only in the other vector are ignored.
    pub fn distance_from_query<F>(self, query: &Document, mode: FeatureMode, other: F) -> f64
    where
        F: Fn(&str) -> f64,
    {
        let sum: f64 = query
            .terms()
            .map(|term| {
                let diff = query.feature(term, mode) - other(term);
                match self {
                    DistanceMetric::Euclidean => diff * diff,
                    DistanceMetric::Manhattan => diff.abs(),
                }
            })
            .sum();

        match self {
            DistanceMetric::Euclidean => sum.sqrt(),
            DistanceMetric::Manhattan => sum,
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = VerdictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "manhattan" => Ok(DistanceMetric::Manhattan),
            other => Err(VerdictError::configuration(format!(
                "invalid distance metric '{other}' (expected euclidean or manhattan)"
            ))),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Euclidean => write!(f, "euclidean"),
            DistanceMetric::Manhattan => write!(f, "manhattan"),
        }
    }
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_k() -> usize {
    DEFAULT_K
}

/// Classifier selection and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierConfig {
    Perceptron {
        /// Must lie strictly between 0 and 1.
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
        /// Start from uniform random weights in [-1, 1] instead of zeros.
        #[serde(default)]
        init_random_weights: bool,
    },
    NaiveBayes,
    Knn {
        /// Number of neighbours; must be at least 1.
        #[serde(default = "default_k")]
        k: usize,
        #[serde(default)]
        distance_metric: DistanceMetric,
    },
    Rocchio {
        #[serde(default)]
        distance_metric: DistanceMetric,
    },
}

impl ClassifierConfig {
    /// Perceptron with the default learning rate and zero weights.
    pub fn perceptron() -> Self {
        ClassifierConfig::Perceptron {
            learning_rate: DEFAULT_LEARNING_RATE,
            init_random_weights: false,
        }
    }

    /// KNN with the default K and Euclidean distance.
    pub fn knn() -> Self {
        ClassifierConfig::Knn {
            k: DEFAULT_K,
            distance_metric: DistanceMetric::default(),
        }
    }

    /// Rocchio with Euclidean distance.
    pub fn rocchio() -> Self {
        ClassifierConfig::Rocchio {
            distance_metric: DistanceMetric::default(),
        }
    }

    /// One default configuration of every strategy.
    pub fn all_defaults() -> Vec<Self> {
        vec![
            Self::perceptron(),
            ClassifierConfig::NaiveBayes,
            Self::knn(),
            Self::rocchio(),
        ]
    }

    /// Display name of the selected strategy.
    pub fn name(&self) -> &'static str {
        match self {
            ClassifierConfig::Perceptron { .. } => "Perceptron",
            ClassifierConfig::NaiveBayes => "Naive Bayes",
            ClassifierConfig::Knn { .. } => "K-NN",
            ClassifierConfig::Rocchio { .. } => "Rocchio",
        }
    }

    /// Check the parameters without training anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            ClassifierConfig::Perceptron { learning_rate, .. } => {
                perceptron::validate_learning_rate(*learning_rate)
            }
            ClassifierConfig::Knn { k, .. } => knn::validate_k(*k),
            ClassifierConfig::NaiveBayes | ClassifierConfig::Rocchio { .. } => Ok(()),
        }
    }

    /// Validate, then build and train a classifier on `training`.
    pub fn train(
        &self,
        training: &[Arc<Document>],
        feature_mode: FeatureMode,
    ) -> Result<Box<dyn SentimentClassifier>> {
        self.train_seeded(training, feature_mode, None)
    }

    /// Like [`train`](Self::train), seeding the random weight initialization
    /// and Rocchio tie breaking when `seed` is given.
    pub fn train_seeded(
        &self,
        training: &[Arc<Document>],
        feature_mode: FeatureMode,
        seed: Option<u64>,
    ) -> Result<Box<dyn SentimentClassifier>> {
        self.validate()?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let classifier: Box<dyn SentimentClassifier> = match self {
            ClassifierConfig::Perceptron {
                learning_rate,
                init_random_weights,
            } => {
                let mut perceptron = Perceptron::new(
                    training,
                    *learning_rate,
                    *init_random_weights,
                    feature_mode,
                    &mut rng,
                )?;
                perceptron.train(training);
                Box::new(perceptron)
            }
            ClassifierConfig::NaiveBayes => Box::new(NaiveBayes::new(training, feature_mode)),
            ClassifierConfig::Knn { k, distance_metric } => Box::new(KNearestNeighbors::new(
                *k,
                training,
                feature_mode,
                *distance_metric,
            )?),
            ClassifierConfig::Rocchio { distance_metric } => {
                Box::new(Rocchio::new(training, feature_mode, *distance_metric, rng))
            }
        };

        Ok(classifier)
    }
}

impl fmt::Display for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierConfig::Perceptron {
                learning_rate,
                init_random_weights,
            } => write!(
                f,
                "Perceptron (learning rate {learning_rate}, {} weights)",
                if *init_random_weights { "random" } else { "zero" }
            ),
            ClassifierConfig::NaiveBayes => write!(f, "Naive Bayes"),
            ClassifierConfig::Knn { k, distance_metric } => {
                write!(f, "K-NN (K = {k}, {distance_metric} distance)")
            }
            ClassifierConfig::Rocchio { distance_metric } => {
                write!(f, "Rocchio ({distance_metric} distance)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> Document {
        Document::from_text("q", text, Sentiment::Positive, false).unwrap()
    }

    #[test]
    fn test_distance_metric_parsing() {
        assert_eq!("EUCLIDEAN".parse::<DistanceMetric>().unwrap(), DistanceMetric::Euclidean);
        assert_eq!("manhattan".parse::<DistanceMetric>().unwrap(), DistanceMetric::Manhattan);
        assert!("cosine".parse::<DistanceMetric>().unwrap_err().is_configuration());
    }

    #[test]
    fn test_distance_over_query_terms() {
        let query = document("a a b");
        // other vector: a -> 1, c -> 10 (c is ignored: not in the query)
        let other = |term: &str| match term {
            "a" => 1.0,
            "c" => 10.0,
            _ => 0.0,
        };

        let manhattan =
            DistanceMetric::Manhattan.distance_from_query(&query, FeatureMode::RawFrequency, other);
        assert!((manhattan - 2.0).abs() < 1e-12);

        let euclidean =
            DistanceMetric::Euclidean.distance_from_query(&query, FeatureMode::RawFrequency, other);
        assert!((euclidean - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_validation_before_training() {
        let bad_rate = ClassifierConfig::Perceptron {
            learning_rate: 1.0,
            init_random_weights: false,
        };
        assert!(bad_rate.validate().unwrap_err().is_configuration());
        assert!(bad_rate.train(&[], FeatureMode::TfIdf).is_err());

        let bad_k = ClassifierConfig::Knn {
            k: 0,
            distance_metric: DistanceMetric::Euclidean,
        };
        assert!(bad_k.validate().unwrap_err().is_configuration());

        for config in ClassifierConfig::all_defaults() {
            assert!(config.validate().is_ok(), "{config}");
        }
    }

    #[test]
    fn test_config_serde() {
        let json = r#"[
            {"type": "perceptron", "learning_rate": 0.3},
            {"type": "naive_bayes"},
            {"type": "knn", "k": 7, "distance_metric": "manhattan"},
            {"type": "rocchio"}
        ]"#;
        let configs: Vec<ClassifierConfig> = serde_json::from_str(json).unwrap();

        assert_eq!(
            configs[0],
            ClassifierConfig::Perceptron {
                learning_rate: 0.3,
                init_random_weights: false
            }
        );
        assert_eq!(configs[1], ClassifierConfig::NaiveBayes);
        assert_eq!(
            configs[2],
            ClassifierConfig::Knn {
                k: 7,
                distance_metric: DistanceMetric::Manhattan
            }
        );
        assert_eq!(configs[3], ClassifierConfig::rocchio());
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = ClassifierConfig::all_defaults()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["Perceptron", "Naive Bayes", "K-NN", "Rocchio"]);
        assert_eq!(
            ClassifierConfig::knn().to_string(),
            "K-NN (K = 5, euclidean distance)"
        );
    }
}
