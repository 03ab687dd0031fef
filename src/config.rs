//! Experiment configuration.
//!
//! An [`ExperimentConfig`] describes one cross-validation run: how reviews are
//! analyzed, which feature the classifiers use, how folds are drawn and which
//! classifier configurations are evaluated. It can be loaded from JSON:
//!
//! ```json
//! {
//!   "strip_punctuation": true,
//!   "feature_mode": "raw_frequency",
//!   "fold_count": 10,
//!   "seed": 42,
//!   "classifiers": [
//!     { "type": "perceptron", "learning_rate": 0.2 },
//!     { "type": "knn", "k": 3, "distance_metric": "manhattan" }
//!   ]
//! }
//! ```
//!
//! Missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::document::FeatureMode;
use crate::error::{Result, VerdictError};
use crate::evaluation::CrossValidator;
use crate::fold::{DEFAULT_FOLD_COUNT, FoldPartitioner};

fn default_fold_count() -> usize {
    DEFAULT_FOLD_COUNT
}

fn default_classifiers() -> Vec<ClassifierConfig> {
    ClassifierConfig::all_defaults()
}

/// Settings for one cross-validation experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Corpus root holding `pos/` and `neg/`.
    pub corpus: Option<PathBuf>,
    /// Drop tokens that are a single punctuation character.
    pub strip_punctuation: bool,
    pub feature_mode: FeatureMode,
    #[serde(default = "default_fold_count")]
    pub fold_count: usize,
    /// Shuffle seed; OS entropy when absent.
    pub seed: Option<u64>,
    /// Evaluate folds in parallel.
    pub parallel: bool,
    #[serde(default = "default_classifiers")]
    pub classifiers: Vec<ClassifierConfig>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            corpus: None,
            strip_punctuation: false,
            feature_mode: FeatureMode::default(),
            fold_count: DEFAULT_FOLD_COUNT,
            seed: None,
            parallel: false,
            classifiers: ClassifierConfig::all_defaults(),
        }
    }
}

impl ExperimentConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VerdictError::configuration(format!(
                "cannot read configuration file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| VerdictError::configuration(format!("invalid configuration: {e}")))
    }

    /// Check the experiment-wide settings. Classifier parameters are checked
    /// separately so that one bad classifier does not block the others.
    pub fn validate(&self) -> Result<()> {
        if self.fold_count == 0 {
            return Err(VerdictError::configuration(
                "fold count must be a positive integer",
            ));
        }
        if self.classifiers.is_empty() {
            return Err(VerdictError::configuration("no classifiers configured"));
        }
        Ok(())
    }

    /// Validate every setting, including each classifier's parameters, and
    /// return the first error.
    pub fn validate_all(&self) -> Result<()> {
        self.validate()?;
        self.classifiers.iter().try_for_each(ClassifierConfig::validate)
    }

    pub fn partitioner(&self) -> Result<FoldPartitioner> {
        let partitioner = FoldPartitioner::new(self.fold_count)?;
        Ok(match self.seed {
            Some(seed) => partitioner.with_seed(seed),
            None => partitioner,
        })
    }

    pub fn cross_validator(&self) -> Result<CrossValidator> {
        Ok(CrossValidator::new(self.partitioner()?)
            .with_feature_mode(self.feature_mode)
            .with_parallel(self.parallel))
    }
}
