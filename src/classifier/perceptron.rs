//! Single-pass perceptron over the training vocabulary.
//!
//! For each training review, in order:
//!
//! ```text
//! sum    = Σ w[t]·x(t) + bias         over the review's terms
//! output = +1 if sum >= 0, else -1
//! error  = target - output            target is +1 / -1
//! bias  += η·error
//! w[t]  += η·error·x(t)               for every term of the review
//! ```
//!
//! There is exactly one pass; no epochs. Classification is stricter than
//! the update rule: only a positive activation predicts positive.

use std::sync::Arc;

use ahash::AHashMap;
use rand::Rng;

use crate::classifier::SentimentClassifier;
use crate::corpus::vocabulary;
use crate::document::{Document, FeatureMode, Sentiment};
use crate::error::{Result, VerdictError};

/// Reject learning rates outside the open interval (0, 1).
pub fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate > 0.0 && learning_rate < 1.0 {
        Ok(())
    } else {
        Err(VerdictError::configuration(format!(
            "perceptron learning rate must be greater than 0 and less than 1, got {learning_rate}"
        )))
    }
}

/// `+1` for a non-negative activation, `-1` otherwise. Training only.
fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: AHashMap<String, f64>,
    bias: f64,
    learning_rate: f64,
    feature_mode: FeatureMode,
}

impl Perceptron {
    /// Initialize weights for every term of `training`, either to zero or to
    /// uniform random values in [-1, 1]. Does not train.
    pub fn new<R: Rng + ?Sized>(
        training: &[Arc<Document>],
        learning_rate: f64,
        init_random_weights: bool,
        feature_mode: FeatureMode,
        rng: &mut R,
    ) -> Result<Self> {
        validate_learning_rate(learning_rate)?;

        // Sorted so that a seeded generator assigns the same weight to the same term.
        let mut terms: Vec<&str> = vocabulary(training).into_iter().collect();
        terms.sort_unstable();

        let weights = terms
            .into_iter()
            .map(|term| {
                let weight = if init_random_weights {
                    rng.random_range(-1.0..=1.0)
                } else {
                    0.0
                };
                (term.to_string(), weight)
            })
            .collect();

        Ok(Self {
            weights,
            bias: 0.0,
            learning_rate,
            feature_mode,
        })
    }

    /// One pass over the training documents, in order.
    pub fn train(&mut self, documents: &[Arc<Document>]) {
        for document in documents {
            self.train_document(document);
        }
    }

    /// Apply the update rule for a single document.
    pub fn train_document(&mut self, document: &Document) {
        let output = sign(self.activation(document));
        let error = document.label().signum() - output;
        if error == 0.0 {
            return;
        }

        let step = self.learning_rate * error;
        self.bias += step;
        for term in document.terms() {
            let x = document.feature(term, self.feature_mode);
            *self.weights.entry(term.to_string()).or_insert(0.0) += step * x;
        }
    }

    /// `Σ w[t]·x(t) + bias`; unseen terms weigh zero.
    pub fn activation(&self, document: &Document) -> f64 {
        let sum: f64 = document
            .terms()
            .map(|term| self.weight(term) * document.feature(term, self.feature_mode))
            .sum();
        sum + self.bias
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Number of terms with a weight.
    pub fn vocabulary_size(&self) -> usize {
        self.weights.len()
    }
}

impl SentimentClassifier for Perceptron {
    fn classify(&self, document: &Document) -> Sentiment {
        Sentiment::from_bool(self.activation(document) > 0.0)
    }

    fn name(&self) -> &str {
        "perceptron"
    }
}
