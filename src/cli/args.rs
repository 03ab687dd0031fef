//! Command line argument parsing for the Verdict CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::classifier::DistanceMetric;
use crate::document::FeatureMode;

/// Verdict - sentiment classification of movie reviews with k-fold cross-validation
#[derive(Parser, Debug, Clone)]
#[command(name = "verdict")]
#[command(about = "Cross-validated sentiment classification of movie reviews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VerdictArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VerdictArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cross-validate one or all classifiers on a corpus
    Evaluate(EvaluateArgs),

    /// Show corpus statistics
    Stats(StatsArgs),
}

/// Arguments for cross-validation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Corpus directory containing pos/ and neg/ (may come from --config instead)
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Experiment configuration file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Classifier to evaluate (default: the configured list, or all four)
    #[arg(long)]
    pub classifier: Option<ClassifierChoice>,

    /// Feature used by classifiers (tf_idf or raw_frequency)
    #[arg(long)]
    pub feature_mode: Option<FeatureMode>,

    /// Drop tokens that are a single punctuation character
    #[arg(long)]
    pub strip_punctuation: bool,

    /// Perceptron learning rate, strictly between 0 and 1
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Start the perceptron from random weights in [-1, 1]
    #[arg(long)]
    pub random_weights: bool,

    /// Number of neighbours for K-NN
    #[arg(short)]
    pub k: Option<usize>,

    /// Distance for K-NN and Rocchio (euclidean or manhattan)
    #[arg(long)]
    pub distance_metric: Option<DistanceMetric>,

    /// Number of cross-validation folds
    #[arg(long)]
    pub folds: Option<usize>,

    /// Shuffle seed for reproducible folds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate folds in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Corpus directory containing pos/ and neg/
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Drop tokens that are a single punctuation character
    #[arg(long)]
    pub strip_punctuation: bool,

    /// Number of terms to list per ranking
    #[arg(long, default_value = "10")]
    pub top: usize,
}

/// Classifier selection on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierChoice {
    Perceptron,
    #[value(name = "naive_bayes", aliases = ["naive-bayes", "bayes"])]
    NaiveBayes,
    Knn,
    Rocchio,
    All,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_command() {
        let args = VerdictArgs::try_parse_from([
            "verdict",
            "evaluate",
            "/data/reviews",
            "--classifier",
            "knn",
            "-k",
            "7",
            "--distance-metric",
            "manhattan",
            "--feature-mode",
            "raw_frequency",
            "--folds",
            "10",
            "--seed",
            "3",
            "--parallel",
        ])
        .unwrap();

        if let Command::Evaluate(eval) = args.command {
            assert_eq!(eval.corpus_dir, Some(PathBuf::from("/data/reviews")));
            assert_eq!(eval.classifier, Some(ClassifierChoice::Knn));
            assert_eq!(eval.k, Some(7));
            assert_eq!(eval.distance_metric, Some(DistanceMetric::Manhattan));
            assert_eq!(eval.feature_mode, Some(FeatureMode::RawFrequency));
            assert_eq!(eval.folds, Some(10));
            assert_eq!(eval.seed, Some(3));
            assert!(eval.parallel);
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_classifier_names() {
        for (name, expected) in [
            ("perceptron", ClassifierChoice::Perceptron),
            ("naive_bayes", ClassifierChoice::NaiveBayes),
            ("naive-bayes", ClassifierChoice::NaiveBayes),
            ("rocchio", ClassifierChoice::Rocchio),
            ("all", ClassifierChoice::All),
        ] {
            let args =
                VerdictArgs::try_parse_from(["verdict", "evaluate", "corpus", "--classifier", name])
                    .unwrap();
            if let Command::Evaluate(eval) = args.command {
                assert_eq!(eval.classifier, Some(expected));
            }
        }

        assert!(
            VerdictArgs::try_parse_from(["verdict", "evaluate", "c", "--classifier", "svm"]).is_err()
        );
        assert!(
            VerdictArgs::try_parse_from(["verdict", "evaluate", "c", "--distance-metric", "cosine"])
                .is_err()
        );
    }

    #[test]
    fn test_stats_command() {
        let args = VerdictArgs::try_parse_from(["verdict", "stats", "corpus", "--top", "3"]).unwrap();
        if let Command::Stats(stats) = args.command {
            assert_eq!(stats.corpus_dir, PathBuf::from("corpus"));
            assert_eq!(stats.top, 3);
            assert!(!stats.strip_punctuation);
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = VerdictArgs::try_parse_from(["verdict", "stats", "c"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = VerdictArgs::try_parse_from(["verdict", "-vv", "stats", "c"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = VerdictArgs::try_parse_from(["verdict", "--quiet", "-vvv", "stats", "c"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = VerdictArgs::try_parse_from(["verdict", "--format", "json", "stats", "c"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
