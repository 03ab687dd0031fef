//! K-fold cross-validation driver.
//!
//! Every classifier is rebuilt from scratch for each fold. When several
//! configurations are evaluated together they all see the same folds.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use crate::classifier::{ClassifierConfig, SentimentClassifier};
use crate::corpus::Corpus;
use crate::document::{Document, FeatureMode};
use crate::error::Result;
use crate::evaluation::report::CrossValidationReport;
use crate::evaluation::stats::FoldStats;
use crate::fold::{Fold, FoldPartitioner};

/// Classify every document of `testing` and tally the outcomes.
pub fn evaluate_fold(classifier: &dyn SentimentClassifier, testing: &[Arc<Document>]) -> FoldStats {
    let mut stats = FoldStats::new();
    for document in testing {
        stats.record(classifier.classify(document), document.label());
    }
    stats
}

/// Runs classifiers over cross-validation folds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossValidator {
    partitioner: FoldPartitioner,
    feature_mode: FeatureMode,
    parallel: bool,
}

impl CrossValidator {
    pub fn new(partitioner: FoldPartitioner) -> Self {
        Self {
            partitioner,
            feature_mode: FeatureMode::default(),
            parallel: false,
        }
    }

    pub fn with_feature_mode(mut self, feature_mode: FeatureMode) -> Self {
        self.feature_mode = feature_mode;
        self
    }

    /// Evaluate folds on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn partitioner(&self) -> &FoldPartitioner {
        &self.partitioner
    }

    pub fn feature_mode(&self) -> FeatureMode {
        self.feature_mode
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Shuffle and partition the corpus.
    pub fn folds(&self, corpus: &Corpus) -> Vec<Fold> {
        self.partitioner.partition(corpus.documents())
    }

    /// Partition the corpus once and evaluate one configuration.
    pub fn run(&self, config: &ClassifierConfig, corpus: &Corpus) -> Result<CrossValidationReport> {
        let folds = self.folds(corpus);
        self.evaluate(config, &folds)
    }

    /// Partition the corpus once and evaluate every configuration on the same
    /// folds. A failing configuration does not stop the others.
    pub fn run_all(
        &self,
        configs: &[ClassifierConfig],
        corpus: &Corpus,
    ) -> Vec<Result<CrossValidationReport>> {
        let folds = self.folds(corpus);
        configs
            .iter()
            .map(|config| self.evaluate(config, &folds))
            .collect()
    }

    /// Evaluate one configuration over pre-built folds.
    ///
    /// The configuration is validated before any fold is trained.
    pub fn evaluate(&self, config: &ClassifierConfig, folds: &[Fold]) -> Result<CrossValidationReport> {
        config.validate()?;

        let start = Instant::now();
        let stats: Vec<FoldStats> = if self.parallel {
            folds
                .par_iter()
                .map(|fold| self.evaluate_one(config, fold))
                .collect::<Result<_>>()?
        } else {
            folds
                .iter()
                .map(|fold| self.evaluate_one(config, fold))
                .collect::<Result<_>>()?
        };

        let report = CrossValidationReport::from_folds(config.name(), config.to_string(), stats);
        info!(
            "{}: {} / {} correct over {} folds in {:.2?}",
            report.description,
            report.total_correct,
            report.total_evaluated,
            report.fold_count(),
            start.elapsed()
        );
        Ok(report)
    }

    fn evaluate_one(&self, config: &ClassifierConfig, fold: &Fold) -> Result<FoldStats> {
        let seed = self
            .partitioner
            .seed()
            .map(|seed| seed.wrapping_add(fold.index() as u64));

        let classifier = config.train_seeded(fold.training(), self.feature_mode, seed)?;
        let stats = evaluate_fold(classifier.as_ref(), fold.testing());

        debug!(
            "{} fold {}: trained on {}, {} / {} correct",
            classifier.name(),
            fold.index(),
            fold.training().len(),
            stats.total_true(),
            stats.total()
        );
        Ok(stats)
    }
}
