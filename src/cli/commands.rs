//! Command implementations for the Verdict CLI.

use std::path::PathBuf;

use anyhow::Context;
use log::error;

use crate::classifier::ClassifierConfig;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ExperimentConfig;
use crate::corpus::Corpus;
use crate::document::Sentiment;
use crate::error::{Result, VerdictError};

/// Execute a CLI command.
pub fn execute_command(args: VerdictArgs) -> Result<()> {
    match &args.command {
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Build the experiment configuration: the config file (or defaults), then
/// command line overrides.
pub fn experiment_config(args: &EvaluateArgs) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(corpus_dir) = &args.corpus_dir {
        config.corpus = Some(corpus_dir.clone());
    }
    if let Some(feature_mode) = args.feature_mode {
        config.feature_mode = feature_mode;
    }
    if let Some(folds) = args.folds {
        config.fold_count = folds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.strip_punctuation |= args.strip_punctuation;
    config.parallel |= args.parallel;

    config.classifiers = match args.classifier {
        None => config.classifiers,
        Some(ClassifierChoice::All) => ClassifierConfig::all_defaults(),
        Some(ClassifierChoice::Perceptron) => vec![ClassifierConfig::perceptron()],
        Some(ClassifierChoice::NaiveBayes) => vec![ClassifierConfig::NaiveBayes],
        Some(ClassifierChoice::Knn) => vec![ClassifierConfig::knn()],
        Some(ClassifierChoice::Rocchio) => vec![ClassifierConfig::rocchio()],
    };
    for classifier in &mut config.classifiers {
        apply_overrides(classifier, args);
    }

    Ok(config)
}

fn apply_overrides(classifier: &mut ClassifierConfig, args: &EvaluateArgs) {
    match classifier {
        ClassifierConfig::Perceptron {
            learning_rate,
            init_random_weights,
        } => {
            if let Some(rate) = args.learning_rate {
                *learning_rate = rate;
            }
            *init_random_weights |= args.random_weights;
        }
        ClassifierConfig::Knn { k, distance_metric } => {
            if let Some(value) = args.k {
                *k = value;
            }
            if let Some(metric) = args.distance_metric {
                *distance_metric = metric;
            }
        }
        ClassifierConfig::Rocchio { distance_metric } => {
            if let Some(metric) = args.distance_metric {
                *distance_metric = metric;
            }
        }
        ClassifierConfig::NaiveBayes => {}
    }
}

/// Cross-validate the configured classifiers.
fn evaluate(args: &EvaluateArgs, cli_args: &VerdictArgs) -> Result<()> {
    let config = experiment_config(args)?;
    config.validate()?;

    let corpus_dir: PathBuf = config.corpus.clone().ok_or_else(|| {
        VerdictError::configuration("no corpus directory given on the command line or in the config")
    })?;

    if cli_args.verbosity() > 1 {
        println!("Loading corpus from: {}", corpus_dir.display());
    }
    let corpus = Corpus::build(&corpus_dir, config.strip_punctuation)
        .with_context(|| format!("failed to load corpus {}", corpus_dir.display()))?;

    let validator = config.cross_validator()?;
    let results = validator.run_all(&config.classifiers, &corpus);

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (classifier, result) in config.classifiers.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!("{} run failed: {e}", classifier.name());
                failures.push(RunFailure {
                    classifier: classifier.name().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    let summary = EvaluationSummary {
        corpus: corpus_dir.display().to_string(),
        documents: corpus.len(),
        fold_count: config.fold_count,
        feature_mode: config.feature_mode,
        seed: config.seed,
        reports,
        failures,
    };
    output_evaluation(&summary, cli_args)?;

    if summary.failures.is_empty() {
        Ok(())
    } else {
        Err(VerdictError::other(format!(
            "{} of {} classifier runs failed",
            summary.failures.len(),
            config.classifiers.len()
        )))
    }
}

/// Show corpus statistics.
fn show_stats(args: &StatsArgs, cli_args: &VerdictArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Gathering statistics for: {}", args.corpus_dir.display());
    }

    let corpus = Corpus::build(&args.corpus_dir, args.strip_punctuation)
        .with_context(|| format!("failed to load corpus {}", args.corpus_dir.display()))?;
    let statistics = corpus.statistics();

    let stats = CorpusSummary {
        corpus: args.corpus_dir.display().to_string(),
        documents: corpus.len(),
        positive: corpus.count(Sentiment::Positive),
        negative: corpus.count(Sentiment::Negative),
        vocabulary_size: statistics.vocabulary_size(),
        total_tokens: statistics.total_tokens(),
        highest_idf: statistics.top_by_idf(args.top),
        most_frequent: statistics.top_by_frequency(args.top),
    };

    output_result("Corpus statistics", &stats, cli_args)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::classifier::DistanceMetric;
    use crate::document::FeatureMode;

    fn evaluate_args(argv: &[&str]) -> EvaluateArgs {
        let mut full = vec!["verdict", "evaluate"];
        full.extend_from_slice(argv);
        match VerdictArgs::try_parse_from(full).unwrap().command {
            Command::Evaluate(args) => args,
            _ => panic!("Expected Evaluate command"),
        }
    }

    #[test]
    fn test_defaults_run_every_classifier() {
        let config = experiment_config(&evaluate_args(&["corpus"])).unwrap();
        assert_eq!(config.corpus, Some(PathBuf::from("corpus")));
        assert_eq!(config.classifiers, ClassifierConfig::all_defaults());
        assert_eq!(config.fold_count, 5);
    }

    #[test]
    fn test_flags_override_parameters() {
        let args = evaluate_args(&[
            "corpus",
            "--classifier",
            "all",
            "--learning-rate",
            "0.4",
            "-k",
            "3",
            "--distance-metric",
            "manhattan",
            "--feature-mode",
            "raw_frequency",
        ]);
        let config = experiment_config(&args).unwrap();

        assert_eq!(config.feature_mode, FeatureMode::RawFrequency);
        assert_eq!(
            config.classifiers,
            vec![
                ClassifierConfig::Perceptron {
                    learning_rate: 0.4,
                    init_random_weights: false
                },
                ClassifierConfig::NaiveBayes,
                ClassifierConfig::Knn {
                    k: 3,
                    distance_metric: DistanceMetric::Manhattan
                },
                ClassifierConfig::Rocchio {
                    distance_metric: DistanceMetric::Manhattan
                },
            ]
        );
    }

    #[test]
    fn test_single_classifier() {
        let config =
            experiment_config(&evaluate_args(&["corpus", "--classifier", "naive_bayes"])).unwrap();
        assert_eq!(config.classifiers, vec![ClassifierConfig::NaiveBayes]);
    }

    #[test]
    fn test_invalid_parameter_is_kept_for_reporting() {
        let config = experiment_config(&evaluate_args(&[
            "corpus",
            "--classifier",
            "perceptron",
            "--learning-rate",
            "1.5",
        ]))
        .unwrap();

        assert!(config.validate().is_ok());
        assert!(config.classifiers[0].validate().unwrap_err().is_configuration());
    }
}
