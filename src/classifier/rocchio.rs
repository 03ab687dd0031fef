//! Nearest-centroid (Rocchio) classification.
//!
//! Each class centroid sums the feature vectors of the class's training
//! reviews, then divides every coordinate by the number of distinct terms in
//! that sum (not by the number of reviews). Terms whose summed value is zero
//! still count toward the divisor.

use std::sync::Arc;

use ahash::AHashMap;
use log::trace;
use parking_lot::Mutex;
use rand::Rng;
use rand::rngs::StdRng;

use crate::classifier::{DistanceMetric, SentimentClassifier};
use crate::document::{Document, FeatureMode, Sentiment};

/// A class centroid in term space.
#[derive(Debug, Clone, Default)]
pub struct Centroid {
    values: AHashMap<String, f64>,
}

impl Centroid {
    fn build<'a, I>(documents: I, feature_mode: FeatureMode) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut values: AHashMap<String, f64> = AHashMap::new();
        for document in documents {
            for term in document.terms() {
                *values.entry(term.to_string()).or_insert(0.0) +=
                    document.feature(term, feature_mode);
            }
        }

        let divisor = values.len() as f64;
        for value in values.values_mut() {
            *value /= divisor;
        }
        Self { values }
    }

    /// Coordinate for `term`; absent terms are zero.
    pub fn value(&self, term: &str) -> f64 {
        self.values.get(term).copied().unwrap_or(0.0)
    }

    /// Number of non-absent coordinates.
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug)]
pub struct Rocchio {
    positive: Centroid,
    negative: Centroid,
    feature_mode: FeatureMode,
    distance_metric: DistanceMetric,
    /// Breaks exact distance ties.
    rng: Mutex<StdRng>,
}

impl Rocchio {
    pub fn new(
        training: &[Arc<Document>],
        feature_mode: FeatureMode,
        distance_metric: DistanceMetric,
        rng: StdRng,
    ) -> Self {
        let of_class = |label: Sentiment| {
            training
                .iter()
                .filter(move |d| d.label() == label)
                .map(|d| d.as_ref())
        };

        Self {
            positive: Centroid::build(of_class(Sentiment::Positive), feature_mode),
            negative: Centroid::build(of_class(Sentiment::Negative), feature_mode),
            feature_mode,
            distance_metric,
            rng: Mutex::new(rng),
        }
    }

    pub fn centroid(&self, label: Sentiment) -> &Centroid {
        match label {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
        }
    }

    /// Distance from `query` to the centroid of `label`.
    pub fn distance(&self, query: &Document, label: Sentiment) -> f64 {
        let centroid = self.centroid(label);
        self.distance_metric
            .distance_from_query(query, self.feature_mode, |term| centroid.value(term))
    }
}

impl SentimentClassifier for Rocchio {
    fn classify(&self, document: &Document) -> Sentiment {
        let positive = self.distance(document, Sentiment::Positive);
        let negative = self.distance(document, Sentiment::Negative);

        if positive < negative {
            Sentiment::Positive
        } else if negative < positive {
            Sentiment::Negative
        } else {
            trace!("centroid tie for {}, choosing at random", document.id());
            Sentiment::from_bool(self.rng.lock().random_bool(0.5))
        }
    }

    fn name(&self) -> &str {
        "rocchio"
    }
}
