//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, VerdictArgs};
use crate::corpus::TermStatistic;
use crate::document::FeatureMode;
use crate::error::Result;
use crate::evaluation::CrossValidationReport;

/// A classifier run that did not produce a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFailure {
    pub classifier: String,
    pub error: String,
}

/// Result structure for the evaluate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub corpus: String,
    pub documents: usize,
    pub fold_count: usize,
    pub feature_mode: FeatureMode,
    pub seed: Option<u64>,
    pub reports: Vec<CrossValidationReport>,
    pub failures: Vec<RunFailure>,
}

/// Corpus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub corpus: String,
    pub documents: usize,
    pub positive: usize,
    pub negative: usize,
    pub vocabulary_size: usize,
    pub total_tokens: u64,
    pub highest_idf: Vec<TermStatistic>,
    pub most_frequent: Vec<TermStatistic>,
}

/// Output an evaluation in the selected format.
pub fn output_evaluation(summary: &EvaluationSummary, args: &VerdictArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", render_evaluation(summary, args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => output_json(summary, args),
    }
}

/// Output a result in the selected format.
pub fn output_result(message: &str, stats: &CorpusSummary, args: &VerdictArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            print!("{}", render_corpus_summary(stats));
            Ok(())
        }
        OutputFormat::Json => output_json(stats, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VerdictArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Human-readable evaluation: a header, then one report block per classifier.
pub fn render_evaluation(summary: &EvaluationSummary, verbosity: u8) -> String {
    let mut out = String::new();
    if verbosity > 0 {
        out.push_str(&format!(
            "Cross-validation of {} documents from {} ({} folds, {} features",
            summary.documents, summary.corpus, summary.fold_count, summary.feature_mode
        ));
        if let Some(seed) = summary.seed {
            out.push_str(&format!(", seed {seed}"));
        }
        out.push_str(")\n\n");
    }

    for (i, report) in summary.reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if verbosity > 1 {
            out.push_str(&format!("[{}]\n", report.description));
        }
        out.push_str(&report.to_string());
    }

    for failure in &summary.failures {
        out.push_str(&format!("\n{}: failed: {}\n", failure.classifier, failure.error));
    }
    out
}

pub fn render_corpus_summary(stats: &CorpusSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Corpus: {}\n", stats.corpus));
    out.push_str(&format!(
        "Documents: {} ({} positive, {} negative)\n",
        stats.documents, stats.positive, stats.negative
    ));
    out.push_str(&format!("Vocabulary size: {}\n", stats.vocabulary_size));
    out.push_str(&format!("Total tokens: {}\n", stats.total_tokens));

    out.push_str("\nHighest IDF terms:\n");
    for term in &stats.highest_idf {
        out.push_str(&format!(
            "  {:<24} idf {:.4}  df {}\n",
            term.term, term.idf, term.document_frequency
        ));
    }

    out.push_str("\nMost frequent terms:\n");
    for term in &stats.most_frequent {
        out.push_str(&format!(
            "  {:<24} {} occurrences in {} documents\n",
            term.term, term.corpus_frequency, term.document_frequency
        ));
    }
    out
}
