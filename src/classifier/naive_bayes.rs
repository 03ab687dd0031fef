//! Multinomial Naive Bayes with optional TF-IDF weighted likelihoods.
//!
//! Per-class statistics are gathered once from the training set. A review's
//! class score is `1 + Σ ln P(term | class)` over the review's distinct terms,
//! and the review is positive iff its positive score is at least its negative
//! score.
//!
//! Term probabilities, with `V` the training vocabulary size (at least 1):
//!
//! ```text
//! term unseen in class:  m · (1 / V)                        m = 1
//! raw frequency:         (f + 1) / (class_total + V)
//! tf-idf:                (f · tfidf_query + 1) / (class_tfidf_sum + V)
//! ```
//!
//! `f` is the summed raw count of the term over the class's training reviews,
//! `class_total` counts (review, distinct term) pairs in the class, and
//! `class_tfidf_sum` sums the TF-IDF of every such pair.

use std::sync::Arc;

use ahash::AHashMap;

use crate::classifier::SentimentClassifier;
use crate::corpus::vocabulary;
use crate::document::{Document, FeatureMode, Sentiment};

/// m-estimate constant for terms a class never saw.
const M_ESTIMATE: f64 = 1.0;

/// Additive base of each class score.
const SCORE_BASE: f64 = 1.0;

#[derive(Debug, Clone, Default)]
struct ClassModel {
    /// Term -> summed raw count over the class's reviews.
    term_frequency: AHashMap<String, u64>,
    /// Number of (review, distinct term) pairs.
    total_terms: u64,
    /// Sum of TF-IDF over every (review, distinct term) pair.
    tf_idf_sum: f64,
    documents: usize,
}

impl ClassModel {
    fn add(&mut self, document: &Document) {
        self.documents += 1;
        for (term, &count) in document.term_counts() {
            *self.term_frequency.entry(term.clone()).or_insert(0) += count as u64;
            self.total_terms += 1;
            self.tf_idf_sum += document.tf_idf(term);
        }
    }

    fn frequency(&self, term: &str) -> u64 {
        self.term_frequency.get(term).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct NaiveBayes {
    positive: ClassModel,
    negative: ClassModel,
    vocabulary_size: usize,
    feature_mode: FeatureMode,
}

impl NaiveBayes {
    /// Gather per-class statistics from `training`.
    pub fn new(training: &[Arc<Document>], feature_mode: FeatureMode) -> Self {
        let mut positive = ClassModel::default();
        let mut negative = ClassModel::default();
        for document in training {
            match document.label() {
                Sentiment::Positive => positive.add(document),
                Sentiment::Negative => negative.add(document),
            }
        }

        Self {
            positive,
            negative,
            vocabulary_size: vocabulary(training).len().max(1),
            feature_mode,
        }
    }

    fn class(&self, label: Sentiment) -> &ClassModel {
        match label {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
        }
    }

    /// Training vocabulary size, never less than 1.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Number of training reviews seen for `label`.
    pub fn class_documents(&self, label: Sentiment) -> usize {
        self.class(label).documents
    }

    /// `P(term | label)`; `query_tf_idf` is the term's weight in the review
    /// being classified and only matters in TF-IDF mode.
    pub fn term_probability(&self, label: Sentiment, term: &str, query_tf_idf: f64) -> f64 {
        let class = self.class(label);
        let vocabulary = self.vocabulary_size as f64;
        let frequency = class.frequency(term) as f64;

        if frequency == 0.0 {
            return M_ESTIMATE * (1.0 / vocabulary);
        }

        match self.feature_mode {
            FeatureMode::RawFrequency => (frequency + 1.0) / (class.total_terms as f64 + vocabulary),
            FeatureMode::TfIdf => {
                (frequency * query_tf_idf + 1.0) / (class.tf_idf_sum + vocabulary)
            }
        }
    }

    /// `1 + Σ ln P(term | label)` over the review's distinct terms.
    pub fn score(&self, document: &Document, label: Sentiment) -> f64 {
        let log_sum: f64 = document
            .terms()
            .map(|term| self.term_probability(label, term, document.tf_idf(term)).ln())
            .sum();
        SCORE_BASE + log_sum
    }
}

impl SentimentClassifier for NaiveBayes {
    fn classify(&self, document: &Document) -> Sentiment {
        let positive = self.score(document, Sentiment::Positive);
        let negative = self.score(document, Sentiment::Negative);
        Sentiment::from_bool(positive >= negative)
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}
