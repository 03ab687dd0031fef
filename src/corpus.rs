//! Corpus loading and corpus-wide term statistics.
//!
//! A corpus root holds two subdirectories, `pos/` and `neg/`, with one review
//! per file. [`Corpus::build`] reads every review, computes document
//! frequency, corpus frequency and IDF over the whole collection, and writes
//! TF-IDF weights back into each [`Document`] before freezing them behind
//! `Arc`.
//!
//! IDF is computed once over the full corpus, before any train/test split, so
//! held-out documents contribute to the IDF seen by every fold.
//!
//! # Examples
//!
//! ```
//! use verdict::corpus::Corpus;
//! use verdict::document::{Document, Sentiment};
//!
//! let corpus = Corpus::from_documents(vec![
//!     Document::from_text("p", "good fun", Sentiment::Positive, false).unwrap(),
//!     Document::from_text("n", "bad fun", Sentiment::Negative, false).unwrap(),
//! ]);
//!
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.statistics().document_frequency("fun"), 2);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::document::{Document, Sentiment};
use crate::error::{Result, VerdictError};

/// Corpus-wide term statistics. Read-only once computed.
#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    document_count: usize,
    /// Term -> number of documents containing it.
    document_frequency: AHashMap<String, u32>,
    /// Term -> total occurrences across the corpus.
    corpus_frequency: AHashMap<String, u64>,
    /// Term -> `max(0, ln(N / (1 + df)))`.
    idf: AHashMap<String, f64>,
}

impl CorpusStatistics {
    /// Compute statistics in one pass over the documents' term counts.
    pub fn compute<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut document_count = 0;
        let mut document_frequency: AHashMap<String, u32> = AHashMap::new();
        let mut corpus_frequency: AHashMap<String, u64> = AHashMap::new();

        for document in documents {
            document_count += 1;
            for (term, &count) in document.term_counts() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
                *corpus_frequency.entry(term.clone()).or_insert(0) += count as u64;
            }
        }

        let idf = document_frequency
            .iter()
            .map(|(term, &df)| (term.clone(), inverse_document_frequency(document_count, df)))
            .collect();

        CorpusStatistics {
            document_count,
            document_frequency,
            corpus_frequency,
            idf,
        }
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct terms in the corpus.
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// Total number of tokens in the corpus.
    pub fn total_tokens(&self) -> u64 {
        self.corpus_frequency.values().sum()
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn corpus_frequency(&self, term: &str) -> u64 {
        self.corpus_frequency.get(term).copied().unwrap_or(0)
    }

    /// IDF of `term`, zero for terms outside the corpus.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// IDF weighted by the unclamped smooth document weight `ln(N / (1 + df))`.
    pub fn smooth_idf(&self, term: &str) -> f64 {
        let df = self.document_frequency(term);
        if df == 0 || self.document_count == 0 {
            return 0.0;
        }
        let weight = (self.document_count as f64 / (1.0 + df as f64)).ln();
        self.idf(term) * weight
    }

    /// The `limit` terms with the highest IDF, ties broken alphabetically.
    pub fn top_by_idf(&self, limit: usize) -> Vec<TermStatistic> {
        self.top_by(limit, |term| self.idf(term))
    }

    /// The `limit` most frequent terms, ties broken alphabetically.
    pub fn top_by_frequency(&self, limit: usize) -> Vec<TermStatistic> {
        self.top_by(limit, |term| self.corpus_frequency(term) as f64)
    }

    fn top_by<F>(&self, limit: usize, key: F) -> Vec<TermStatistic>
    where
        F: Fn(&str) -> f64,
    {
        let mut terms: Vec<(&str, f64)> = self
            .document_frequency
            .keys()
            .map(|term| (term.as_str(), key(term)))
            .collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        terms
            .into_iter()
            .take(limit)
            .map(|(term, _)| TermStatistic {
                term: term.to_string(),
                document_frequency: self.document_frequency(term),
                corpus_frequency: self.corpus_frequency(term),
                idf: self.idf(term),
            })
            .collect()
    }
}

/// Statistics of one term, as reported by the `stats` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStatistic {
    pub term: String,
    pub document_frequency: u32,
    pub corpus_frequency: u64,
    pub idf: f64,
}

/// `max(0, ln(n / (1 + df)))`.
pub fn inverse_document_frequency(document_count: usize, document_frequency: u32) -> f64 {
    let quotient = document_count as f64 / (1.0 + document_frequency as f64);
    quotient.ln().max(0.0)
}

/// Unique terms across a set of documents.
pub fn vocabulary<'a, I>(documents: I) -> AHashSet<&'a str>
where
    I: IntoIterator<Item = &'a Arc<Document>>,
{
    documents
        .into_iter()
        .flat_map(|document| document.terms())
        .collect()
}

/// A loaded, weighted review collection.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: Option<PathBuf>,
    documents: Vec<Arc<Document>>,
    statistics: CorpusStatistics,
}

impl Corpus {
    /// Load every review under `root/pos` and `root/neg`.
    ///
    /// A missing or unreadable directory or file aborts the whole load. A file
    /// whose content is not valid UTF-8 is logged and left out.
    pub fn build<P: AsRef<Path>>(root: P, strip_punctuation: bool) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(VerdictError::corpus_load(format!(
                "corpus directory {} does not exist",
                root.display()
            )));
        }

        let mut documents = Vec::new();
        for label in [Sentiment::Positive, Sentiment::Negative] {
            let dir = root.join(label.directory_name());
            let loaded = load_label_directory(&dir, label, strip_punctuation)?;
            debug!("loaded {} {label} reviews from {}", loaded.len(), dir.display());
            documents.extend(loaded);
        }

        let mut corpus = Self::from_documents(documents);
        corpus.root = Some(root.to_path_buf());

        info!(
            "corpus {}: {} documents ({} positive, {} negative), {} distinct terms",
            root.display(),
            corpus.len(),
            corpus.count(Sentiment::Positive),
            corpus.count(Sentiment::Negative),
            corpus.statistics.vocabulary_size()
        );

        Ok(corpus)
    }

    /// Compute statistics and TF-IDF weights for already-parsed documents.
    pub fn from_documents(mut documents: Vec<Document>) -> Self {
        let statistics = CorpusStatistics::compute(&documents);

        for document in &mut documents {
            let weights: Vec<(String, f64)> = document
                .log_norm_map()
                .iter()
                .map(|(term, &tf)| (term.clone(), tf * statistics.idf(term)))
                .collect();
            for (term, weight) in weights {
                document.set_tf_idf(&term, weight);
            }
        }

        if documents.is_empty() {
            warn!("corpus is empty");
        }

        Corpus {
            root: None,
            documents: documents.into_iter().map(Arc::new).collect(),
            statistics,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn documents(&self) -> &[Arc<Document>] {
        &self.documents
    }

    pub fn statistics(&self) -> &CorpusStatistics {
        &self.statistics
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct terms across the corpus.
    pub fn vocabulary_size(&self) -> usize {
        self.statistics.vocabulary_size()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents carrying `label`.
    pub fn count(&self, label: Sentiment) -> usize {
        self.documents.iter().filter(|d| d.label() == label).count()
    }
}

fn load_label_directory(dir: &Path, label: Sentiment, strip_punctuation: bool) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(VerdictError::corpus_load(format!(
            "missing {label} review directory {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| VerdictError::corpus_io(dir, e))? {
        let path = entry.map_err(|e| VerdictError::corpus_io(dir, e))?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        match Document::parse(&path, label, strip_punctuation) {
            Ok(document) => documents.push(document),
            Err(VerdictError::Io(err)) if err.kind() == io::ErrorKind::InvalidData => {
                warn!("skipping {}: {err}", path.display());
            }
            Err(VerdictError::Io(err)) => return Err(VerdictError::corpus_io(&path, err)),
            Err(err) => return Err(err),
        }
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str, label: Sentiment) -> Document {
        Document::from_text(id, text, label, false).unwrap()
    }

    fn sample_corpus() -> Corpus {
        Corpus::from_documents(vec![
            doc("p1", "good good film", Sentiment::Positive),
            doc("p2", "great film", Sentiment::Positive),
            doc("n1", "bad film", Sentiment::Negative),
            doc("n2", "bad plot", Sentiment::Negative),
            doc("n3", "dull", Sentiment::Negative),
        ])
    }

    #[test]
    fn test_frequencies() {
        let corpus = sample_corpus();
        let stats = corpus.statistics();

        assert_eq!(stats.document_count(), 5);
        assert_eq!(stats.document_frequency("film"), 3);
        assert_eq!(stats.document_frequency("good"), 1);
        assert_eq!(stats.corpus_frequency("good"), 2);
        assert_eq!(stats.corpus_frequency("missing"), 0);
        assert_eq!(stats.vocabulary_size(), 6);
        assert_eq!(stats.total_tokens(), 10);
    }

    #[test]
    fn test_idf_is_clamped_at_zero() {
        let stats = sample_corpus().statistics().clone();

        // ln(5 / 4) for a term in three documents
        assert!((stats.idf("film") - (5.0f64 / 4.0).ln()).abs() < 1e-12);
        // ln(5 / 2) for a term in one document
        assert!((stats.idf("good") - 2.5f64.ln()).abs() < 1e-12);
        assert_eq!(stats.idf("missing"), 0.0);

        // every document containing the term: ln(2 / 3) < 0 -> 0
        assert_eq!(inverse_document_frequency(2, 2), 0.0);
    }

    #[test]
    fn test_tf_idf_written_back() {
        let corpus = sample_corpus();
        let stats = corpus.statistics();

        for document in corpus.documents() {
            assert_eq!(document.tf_idf_map().len(), document.distinct_terms());
            for term in document.terms() {
                let expected = document.log_norm(term) * stats.idf(term);
                assert!((document.tf_idf(term) - expected).abs() < 1e-12);
            }
        }

        let p1 = &corpus.documents()[0];
        let expected = (2.0f64.ln() + 1.0) * 2.5f64.ln();
        assert!((p1.tf_idf("good") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_label_counts_and_vocabulary() {
        let corpus = sample_corpus();
        assert_eq!(corpus.count(Sentiment::Positive), 2);
        assert_eq!(corpus.count(Sentiment::Negative), 3);

        let vocab = vocabulary(&corpus.documents()[..2]);
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("great"));
    }

    #[test]
    fn test_top_terms() {
        let stats = sample_corpus().statistics().clone();

        let frequent = stats.top_by_frequency(2);
        assert_eq!(frequent[0].term, "film");
        assert_eq!(frequent[0].corpus_frequency, 3);
        assert_eq!(frequent[1].term, "bad");

        let rare = stats.top_by_idf(1);
        assert_eq!(rare[0].term, "dull");
    }

    #[test]
    fn test_smooth_idf() {
        let stats = sample_corpus().statistics().clone();
        let weight = 2.5f64.ln();
        assert!((stats.smooth_idf("good") - weight * weight).abs() < 1e-12);
        assert_eq!(stats.smooth_idf("missing"), 0.0);
    }

    #[test]
    fn test_missing_root_is_corpus_error() {
        let err = Corpus::build("/nonexistent/corpus", false).unwrap_err();
        assert!(matches!(err, VerdictError::CorpusLoad(_)));
    }
}
