//! K-fold partitioning for cross-validation.
//!
//! The document list is shuffled once and cut into `k` contiguous slices of
//! `len / k` documents; the last `len % k` documents after the shuffle are not
//! used. Fold `i` tests on slice `i` and trains on the other slices
//! concatenated in slice order.
//!
//! # Examples
//!
//! ```
//! use verdict::corpus::Corpus;
//! use verdict::document::{Document, Sentiment};
//! use verdict::fold::FoldPartitioner;
//!
//! let docs = (0..7)
//!     .map(|i| Document::from_text(format!("d{i}"), "fine", Sentiment::from_bool(i % 2 == 0), false).unwrap())
//!     .collect();
//! let corpus = Corpus::from_documents(docs);
//!
//! let folds = FoldPartitioner::new(3).unwrap().with_seed(7).partition(corpus.documents());
//! assert_eq!(folds.len(), 3);
//! assert_eq!(folds[0].testing().len(), 2);
//! assert_eq!(folds[0].training().len(), 4);
//! ```

use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::document::Document;
use crate::error::{Result, VerdictError};

/// Default number of folds.
pub const DEFAULT_FOLD_COUNT: usize = 5;

/// One (training set, held-out test set) pair.
#[derive(Debug, Clone)]
pub struct Fold {
    index: usize,
    training: Vec<Arc<Document>>,
    testing: Vec<Arc<Document>>,
}

impl Fold {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn training(&self) -> &[Arc<Document>] {
        &self.training
    }

    pub fn testing(&self) -> &[Arc<Document>] {
        &self.testing
    }

    /// Training plus testing documents.
    pub fn len(&self) -> usize {
        self.training.len() + self.testing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits a document set into `k` cross-validation folds.
#[derive(Debug, Clone, Copy)]
pub struct FoldPartitioner {
    fold_count: usize,
    seed: Option<u64>,
}

impl Default for FoldPartitioner {
    fn default() -> Self {
        Self {
            fold_count: DEFAULT_FOLD_COUNT,
            seed: None,
        }
    }
}

impl FoldPartitioner {
    /// Create a partitioner producing `fold_count` folds.
    pub fn new(fold_count: usize) -> Result<Self> {
        if fold_count == 0 {
            return Err(VerdictError::configuration(
                "fold count must be a positive integer",
            ));
        }
        Ok(Self {
            fold_count,
            seed: None,
        })
    }

    /// Fix the shuffle seed so partitions are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn fold_count(&self) -> usize {
        self.fold_count
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Shuffle (seeded if configured) and split into folds.
    pub fn partition(&self, documents: &[Arc<Document>]) -> Vec<Fold> {
        match self.seed {
            Some(seed) => self.partition_with_rng(documents, &mut StdRng::seed_from_u64(seed)),
            None => self.partition_with_rng(documents, &mut rand::rng()),
        }
    }

    /// Shuffle with the given generator and split into folds.
    pub fn partition_with_rng<R: Rng + ?Sized>(
        &self,
        documents: &[Arc<Document>],
        rng: &mut R,
    ) -> Vec<Fold> {
        let mut shuffled = documents.to_vec();
        shuffled.shuffle(rng);
        self.split(&shuffled)
    }

    /// Split in the given order, without shuffling.
    pub fn split(&self, documents: &[Arc<Document>]) -> Vec<Fold> {
        let k = self.fold_count;
        let slice_size = documents.len() / k;
        let dropped = documents.len() % k;
        if dropped > 0 {
            debug!(
                "{} documents do not fill a {k}-way split; the last {dropped} are left out",
                documents.len()
            );
        }
        if slice_size == 0 {
            debug!("fewer documents than folds: every fold is empty");
        }

        let slices: Vec<&[Arc<Document>]> = (0..k)
            .map(|i| &documents[i * slice_size..(i + 1) * slice_size])
            .collect();

        (0..k)
            .map(|i| {
                let training = slices
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .flat_map(|(_, slice)| slice.iter().cloned())
                    .collect();
                Fold {
                    index: i,
                    training,
                    testing: slices[i].to_vec(),
                }
            })
            .collect()
    }
}
