//! Criterion benchmarks for VeriNews.
//!
//! Covers the three stages a request goes through:
//! - Text normalization
//! - TF-IDF transformation
//! - End-to-end classification

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use verinews::classifier::NewsClassifier;
use verinews::ml::forest::{DecisionTree, RandomForest};
use verinews::ml::vectorizer::{TfidfVectorizer, VectorizerConfig};
use verinews::normalizer::Normalizer;

/// Generate test headlines for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "breaking",
        "scientists",
        "confirm",
        "shocking",
        "hoax",
        "government",
        "officials",
        "deny",
        "reports",
        "election",
        "vaccine",
        "celebrity",
        "secret",
        "exposed",
        "study",
        "finds",
        "water",
        "climate",
        "president",
        "announced",
        "the",
        "is",
        "was",
        "of",
    ];

    (0..count)
        .map(|i| {
            let length = 20 + (i % 60);
            let mut text = (0..length)
                .map(|j| words[(i * 7 + j * 13) % words.len()])
                .collect::<Vec<_>>()
                .join(" ");
            text.push_str("!!!");
            text
        })
        .collect()
}

fn build_vectorizer(normalizer: &Normalizer, documents: &[String]) -> TfidfVectorizer {
    let mut terms = documents
        .iter()
        .flat_map(|doc| {
            normalizer
                .normalize(doc)
                .terms()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    terms.sort();
    terms.dedup();

    let idf = (0..terms.len()).map(|i| 1.0 + (i % 5) as f64 * 0.3).collect();
    let vocabulary = terms.into_iter().enumerate().map(|(i, term)| (term, i));
    TfidfVectorizer::new(vocabulary, idf, VectorizerConfig::default()).unwrap()
}

/// Forest of depth-limited trees, each splitting on one feature per level.
fn build_forest(n_features: usize, n_trees: usize, depth: u32) -> RandomForest {
    let trees = (0..n_trees)
        .map(|t| {
            let internal = (1usize << depth) - 1;
            let n_nodes = (1usize << (depth + 1)) - 1;

            let mut children_left = vec![-1; n_nodes];
            let mut children_right = vec![-1; n_nodes];
            let mut feature = vec![-2; n_nodes];
            let mut threshold = vec![-2.0; n_nodes];
            let mut value = vec![vec![0.0, 0.0]; n_nodes];

            for node in 0..n_nodes {
                if node < internal {
                    children_left[node] = (2 * node + 1) as i64;
                    children_right[node] = (2 * node + 2) as i64;
                    feature[node] = ((t * 31 + node * 17) % n_features) as i64;
                    threshold[node] = 0.05;
                } else {
                    let fake = (t + node) % 3 == 0;
                    value[node] = if fake { vec![2.0, 8.0] } else { vec![7.0, 3.0] };
                }
            }

            DecisionTree::new(children_left, children_right, feature, threshold, value)
        })
        .collect();

    RandomForest::new(n_features, vec![0, 1], trees).unwrap()
}

fn bench_normalization(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    let documents = generate_test_documents(100);
    let bytes: usize = documents.iter().map(String::len).sum();

    let mut group = c.benchmark_group("normalization");
    group.throughput(Throughput::Bytes(bytes as u64));
    group.bench_function("normalize_100_headlines", |b| {
        b.iter(|| {
            for doc in &documents {
                black_box(normalizer.normalize(black_box(doc)));
            }
        })
    });
    group.finish();
}

fn bench_vectorization(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    let documents = generate_test_documents(100);
    let vectorizer = build_vectorizer(&normalizer, &documents);
    let normalized: Vec<_> = documents.iter().map(|d| normalizer.normalize(d)).collect();

    let mut group = c.benchmark_group("vectorization");
    group.throughput(Throughput::Elements(normalized.len() as u64));
    group.bench_function("tfidf_transform", |b| {
        b.iter(|| {
            for text in &normalized {
                black_box(vectorizer.transform(black_box(text.as_str())));
            }
        })
    });
    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    let documents = generate_test_documents(100);
    let vectorizer = build_vectorizer(&normalizer, &documents);

    let mut group = c.benchmark_group("classification");
    group.throughput(Throughput::Elements(documents.len() as u64));

    for n_trees in [10, 100] {
        let forest = build_forest(vectorizer.dimension(), n_trees, 8);
        let classifier = NewsClassifier::new(vectorizer.clone(), forest.into()).unwrap();

        group.bench_function(format!("classify_news_{n_trees}_trees"), |b| {
            b.iter(|| {
                for doc in &documents {
                    black_box(classifier.classify_news(black_box(doc)));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_vectorization,
    bench_classification
);
criterion_main!(benches);
