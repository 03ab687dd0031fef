//! Review documents and their per-term weights.
//!
//! A [`Document`] is built once per review file. It owns the raw term counts
//! and the log-normalized term frequencies; TF-IDF weights are written back by
//! the [`Corpus`](crate::corpus::Corpus) once corpus-wide IDF is known. After
//! that the document is shared read-only (as `Arc<Document>`) by every fold.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::error::{Result, VerdictError};

/// Sentiment label of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Map a boolean label (`true` = positive) to a sentiment.
    pub fn from_bool(positive: bool) -> Self {
        if positive {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        self == Sentiment::Positive
    }

    /// `+1.0` for positive, `-1.0` for negative.
    pub fn signum(self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Negative => -1.0,
        }
    }

    /// Name of the corpus subdirectory holding documents with this label.
    pub fn directory_name(self) -> &'static str {
        match self {
            Sentiment::Positive => "pos",
            Sentiment::Negative => "neg",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Which per-term value classifiers use as the feature of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMode {
    /// Log-normalized term frequency times corpus IDF.
    #[default]
    TfIdf,
    /// Raw occurrence count.
    RawFrequency,
}

impl FromStr for FeatureMode {
    type Err = VerdictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "tf_idf" | "tfidf" => Ok(FeatureMode::TfIdf),
            "raw_frequency" | "raw" | "frequency" => Ok(FeatureMode::RawFrequency),
            other => Err(VerdictError::configuration(format!(
                "unknown feature mode '{other}' (expected tf_idf or raw_frequency)"
            ))),
        }
    }
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureMode::TfIdf => write!(f, "tf_idf"),
            FeatureMode::RawFrequency => write!(f, "raw_frequency"),
        }
    }
}

/// `ln(count) + 1` for a positive count, `0` otherwise.
pub fn log_normalize(count: u32) -> f64 {
    if count > 0 {
        (count as f64).ln() + 1.0
    } else {
        0.0
    }
}

/// A single labeled review.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier, usually the source path.
    id: String,
    /// Source file, if the document was read from disk.
    path: Option<PathBuf>,
    label: Sentiment,
    /// Term -> raw occurrence count.
    term_counts: AHashMap<String, u32>,
    /// Term -> `ln(count) + 1`.
    term_log_norm: AHashMap<String, f64>,
    /// Term -> tf-idf. Empty until the corpus pass completes.
    term_tf_idf: AHashMap<String, f64>,
}

impl Document {
    /// Read and tokenize a review file.
    ///
    /// I/O failures are returned as [`VerdictError::Io`] so the caller can
    /// tell undecodable content (`InvalidData`) apart from unreadable files.
    pub fn parse<P: AsRef<Path>>(path: P, label: Sentiment, strip_punctuation: bool) -> Result<Self> {
        let analyzer = PipelineAnalyzer::for_reviews(strip_punctuation);
        Self::parse_with(path, label, &analyzer)
    }

    /// Read and tokenize a review file with a custom analyzer.
    pub fn parse_with<P: AsRef<Path>>(
        path: P,
        label: Sentiment,
        analyzer: &dyn Analyzer,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut document = Self::from_reader(
            path.display().to_string(),
            BufReader::new(file),
            label,
            analyzer,
        )?;
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Build a document from any line-oriented reader.
    pub fn from_reader<R: BufRead>(
        id: impl Into<String>,
        reader: R,
        label: Sentiment,
        analyzer: &dyn Analyzer,
    ) -> Result<Self> {
        let mut term_counts: AHashMap<String, u32> = AHashMap::new();

        for line in reader.lines() {
            let line = line?;
            for token in analyzer.analyze(&line)? {
                *term_counts.entry(token.text).or_insert(0) += 1;
            }
        }

        Ok(Self::from_counts(id, label, term_counts))
    }

    /// Build a document from in-memory text.
    pub fn from_text(
        id: impl Into<String>,
        text: &str,
        label: Sentiment,
        strip_punctuation: bool,
    ) -> Result<Self> {
        let analyzer = PipelineAnalyzer::for_reviews(strip_punctuation);
        Self::from_reader(id, text.as_bytes(), label, &analyzer)
    }

    /// Build a document from precomputed term counts.
    pub fn from_counts(
        id: impl Into<String>,
        label: Sentiment,
        term_counts: AHashMap<String, u32>,
    ) -> Self {
        let term_log_norm = term_counts
            .iter()
            .map(|(term, &count)| (term.clone(), log_normalize(count)))
            .collect();

        Document {
            id: id.into(),
            path: None,
            label,
            term_counts,
            term_log_norm,
            term_tf_idf: AHashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn label(&self) -> Sentiment {
        self.label
    }

    /// Iterate over the distinct terms of this document (its bag of words).
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.term_counts.keys().map(String::as_str)
    }

    pub fn term_counts(&self) -> &AHashMap<String, u32> {
        &self.term_counts
    }

    /// Number of distinct terms.
    pub fn distinct_terms(&self) -> usize {
        self.term_counts.len()
    }

    /// Total number of tokens counted.
    pub fn total_terms(&self) -> u64 {
        self.term_counts.values().map(|&c| c as u64).sum()
    }

    /// Raw count of `term`, zero if absent.
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Log-normalized frequency of `term`, zero if absent.
    pub fn log_norm(&self, term: &str) -> f64 {
        self.term_log_norm.get(term).copied().unwrap_or(0.0)
    }

    pub fn log_norm_map(&self) -> &AHashMap<String, f64> {
        &self.term_log_norm
    }

    /// TF-IDF weight of `term`, zero if absent or not yet computed.
    pub fn tf_idf(&self, term: &str) -> f64 {
        self.term_tf_idf.get(term).copied().unwrap_or(0.0)
    }

    pub fn tf_idf_map(&self) -> &AHashMap<String, f64> {
        &self.term_tf_idf
    }

    /// Feature value of `term` under the given weighting, zero if absent.
    pub fn feature(&self, term: &str, mode: FeatureMode) -> f64 {
        match mode {
            FeatureMode::TfIdf => self.tf_idf(term),
            FeatureMode::RawFrequency => self.term_count(term) as f64,
        }
    }

    /// Store the TF-IDF weight of a term this document contains.
    ///
    /// Returns `false` (and stores nothing) if the term is not in the bag.
    pub(crate) fn set_tf_idf(&mut self, term: &str, value: f64) -> bool {
        match self.term_counts.get_key_value(term) {
            Some((key, _)) => {
                self.term_tf_idf.insert(key.clone(), value);
                true
            }
            None => {
                log::warn!("{}: term '{term}' is not in the document", self.id);
                false
            }
        }
    }
}
