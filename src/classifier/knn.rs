//! K-nearest-neighbours over stored training reviews.

use std::sync::Arc;

use crate::classifier::{DistanceMetric, SentimentClassifier};
use crate::document::{Document, FeatureMode, Sentiment};
use crate::error::{Result, VerdictError};

/// Reject K = 0.
pub fn validate_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(VerdictError::configuration(
            "K must be a positive integer",
        ));
    }
    Ok(())
}

/// A training review and its distance from the query.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub document: Arc<Document>,
    pub distance: f64,
}

/// Lazy learner: training only stores the documents.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    k: usize,
    training: Vec<Arc<Document>>,
    feature_mode: FeatureMode,
    distance_metric: DistanceMetric,
}

impl KNearestNeighbors {
    pub fn new(
        k: usize,
        training: &[Arc<Document>],
        feature_mode: FeatureMode,
        distance_metric: DistanceMetric,
    ) -> Result<Self> {
        validate_k(k)?;
        Ok(Self {
            k,
            training: training.to_vec(),
            feature_mode,
            distance_metric,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    /// Distance from `query` to one training review, over the query's terms.
    pub fn distance(&self, query: &Document, other: &Document) -> f64 {
        let mode = self.feature_mode;
        self.distance_metric
            .distance_from_query(query, mode, |term| other.feature(term, mode))
    }

    /// The `min(K, n)` closest training reviews, nearest first. Equal
    /// distances keep training-set order.
    pub fn neighbors(&self, query: &Document) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = self
            .training
            .iter()
            .map(|document| Neighbor {
                distance: self.distance(query, document),
                document: Arc::clone(document),
            })
            .collect();

        // sort_by is stable
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(self.k);
        neighbors
    }
}

impl SentimentClassifier for KNearestNeighbors {
    fn classify(&self, document: &Document) -> Sentiment {
        let neighbors = self.neighbors(document);
        let positive = neighbors
            .iter()
            .filter(|n| n.document.label().is_positive())
            .count();
        let negative = neighbors.len() - positive;
        Sentiment::from_bool(positive >= negative)
    }

    fn name(&self) -> &str {
        "knn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;

    fn corpus(docs: &[(&str, Sentiment)]) -> Corpus {
        Corpus::from_documents(
            docs.iter()
                .enumerate()
                .map(|(i, (text, label))| {
                    Document::from_text(format!("d{i}"), text, *label, false).unwrap()
                })
                .collect(),
        )
    }

    fn query(text: &str) -> Document {
        Document::from_text("q", text, Sentiment::Negative, false).unwrap()
    }

    #[test]
    fn test_zero_k_rejected() {
        assert!(validate_k(0).unwrap_err().is_configuration());
        assert!(
            KNearestNeighbors::new(0, &[], FeatureMode::TfIdf, DistanceMetric::Euclidean).is_err()
        );
    }

    #[test]
    fn test_exact_duplicate_with_k_one() {
        let corpus = corpus(&[
            ("loved every minute", Sentiment::Positive),
            ("hated every minute", Sentiment::Negative),
            ("fine film", Sentiment::Positive),
        ]);
        let knn = KNearestNeighbors::new(
            1,
            corpus.documents(),
            FeatureMode::RawFrequency,
            DistanceMetric::Euclidean,
        )
        .unwrap();

        let duplicate = &corpus.documents()[1];
        let neighbors = knn.neighbors(duplicate);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].distance, 0.0);
        assert_eq!(knn.classify(duplicate), Sentiment::Negative);
    }

    #[test]
    fn test_k_larger_than_training_set_is_majority_vote() {
        let corpus = corpus(&[
            ("bad", Sentiment::Negative),
            ("worse", Sentiment::Negative),
            ("great", Sentiment::Positive),
        ]);
        let knn = KNearestNeighbors::new(
            10,
            corpus.documents(),
            FeatureMode::RawFrequency,
            DistanceMetric::Manhattan,
        )
        .unwrap();

        assert_eq!(knn.neighbors(&query("great")).len(), 3);
        assert_eq!(knn.classify(&query("great")), Sentiment::Negative);
    }

    #[test]
    fn test_vote_tie_goes_positive() {
        let corpus = corpus(&[("bad", Sentiment::Negative), ("good", Sentiment::Positive)]);
        let knn = KNearestNeighbors::new(
            2,
            corpus.documents(),
            FeatureMode::RawFrequency,
            DistanceMetric::Euclidean,
        )
        .unwrap();
        assert_eq!(knn.classify(&query("bad")), Sentiment::Positive);

        let empty =
            KNearestNeighbors::new(3, &[], FeatureMode::TfIdf, DistanceMetric::Euclidean).unwrap();
        assert_eq!(empty.classify(&query("anything")), Sentiment::Positive);
    }

    #[test]
    fn test_neighbors_sorted_with_stable_ties() {
        let corpus = corpus(&[
            ("x y", Sentiment::Positive),
            ("a", Sentiment::Negative),
            ("z", Sentiment::Negative),
            ("a a", Sentiment::Positive),
        ]);
        let knn = KNearestNeighbors::new(
            4,
            corpus.documents(),
            FeatureMode::RawFrequency,
            DistanceMetric::Manhattan,
        )
        .unwrap();

        // query "a": d1 is at 0, the rest tie at 1 and keep training order
        let ids: Vec<_> = knn
            .neighbors(&query("a"))
            .iter()
            .map(|n| n.document.id().to_string())
            .collect();
        assert_eq!(ids, vec!["d1", "d0", "d2", "d3"]);
    }
}
