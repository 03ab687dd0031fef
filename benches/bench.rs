//! Criterion benchmarks for Verdict.
//!
//! Covers the main stages of an experiment over a synthetic corpus:
//! - Text analysis and document construction
//! - Corpus statistics and TF-IDF weighting
//! - Classifier training and classification
//! - Full cross-validation, sequential and parallel

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use verdict::analysis::analyzer::Analyzer;
use verdict::analysis::analyzer::pipeline::PipelineAnalyzer;
use verdict::classifier::ClassifierConfig;
use verdict::corpus::Corpus;
use verdict::document::{Document, FeatureMode, Sentiment};
use verdict::evaluation::{CrossValidator, evaluate_fold};
use verdict::fold::FoldPartitioner;

const POSITIVE_WORDS: &[&str] = &[
    "brilliant", "moving", "superb", "charming", "gripping", "witty", "beautiful", "masterful",
];
const NEGATIVE_WORDS: &[&str] = &[
    "dull", "boring", "clumsy", "tedious", "awful", "lifeless", "predictable", "weak",
];
const NEUTRAL_WORDS: &[&str] = &[
    "film", "plot", "actor", "scene", "director", "story", "the", "a", "and", "of", ",", ".",
];

/// Generate synthetic review texts, alternating positive and negative.
fn generate_reviews(count: usize) -> Vec<(String, Sentiment)> {
    (0..count)
        .map(|i| {
            let label = Sentiment::from_bool(i % 2 == 0);
            let polar = if label.is_positive() {
                POSITIVE_WORDS
            } else {
                NEGATIVE_WORDS
            };
            let length = 80 + (i % 120);
            let words: Vec<&str> = (0..length)
                .map(|j| {
                    // Pseudo-random mix, mostly neutral words.
                    if (i * 7 + j * 13) % 5 == 0 {
                        polar[(i + j * 3) % polar.len()]
                    } else {
                        NEUTRAL_WORDS[(i * 11 + j * 17) % NEUTRAL_WORDS.len()]
                    }
                })
                .collect();
            (words.join(" "), label)
        })
        .collect()
}

fn generate_corpus(count: usize) -> Corpus {
    let documents = generate_reviews(count)
        .iter()
        .enumerate()
        .map(|(i, (text, label))| {
            Document::from_text(format!("review{i}"), text, *label, true).unwrap()
        })
        .collect();
    Corpus::from_documents(documents)
}

/// Benchmark text analysis and corpus construction.
fn bench_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus");

    let reviews = generate_reviews(500);
    let analyzer = PipelineAnalyzer::for_reviews(true);

    group.bench_function("analyze_single_review", |b| {
        b.iter(|| {
            let tokens = analyzer.analyze(black_box(&reviews[0].0)).unwrap().count();
            black_box(tokens)
        })
    });

    group.throughput(Throughput::Elements(reviews.len() as u64));
    group.bench_function("build_corpus", |b| {
        b.iter(|| {
            let documents = reviews
                .iter()
                .enumerate()
                .map(|(i, (text, label))| {
                    Document::from_text(format!("review{i}"), text, *label, true).unwrap()
                })
                .collect();
            black_box(Corpus::from_documents(documents))
        })
    });

    group.finish();
}

/// Benchmark training plus classification of one fold per classifier.
fn bench_classifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifiers");
    group.sample_size(20);

    let corpus = generate_corpus(400);
    let folds = FoldPartitioner::new(5)
        .unwrap()
        .with_seed(42)
        .partition(corpus.documents());
    let fold = &folds[0];

    for config in ClassifierConfig::all_defaults() {
        group.bench_function(config.name(), |b| {
            b.iter(|| {
                let classifier = config
                    .train_seeded(black_box(fold.training()), FeatureMode::TfIdf, Some(1))
                    .unwrap();
                black_box(evaluate_fold(classifier.as_ref(), fold.testing()))
            })
        });
    }

    group.finish();
}

/// Benchmark a full cross-validation run, sequential and parallel.
fn bench_cross_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_validation");
    group.sample_size(10);

    let corpus = generate_corpus(400);
    let partitioner = FoldPartitioner::new(5).unwrap().with_seed(42);
    let config = ClassifierConfig::knn();

    for parallel in [false, true] {
        let validator = CrossValidator::new(partitioner).with_parallel(parallel);
        let name = if parallel { "knn_parallel" } else { "knn_sequential" };
        group.bench_function(name, |b| {
            b.iter(|| black_box(validator.run(&config, &corpus).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_corpus, bench_classifiers, bench_cross_validation);
criterion_main!(benches);
