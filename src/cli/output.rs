//! Output formatting for CLI commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::{NewsClassifier, Prediction};
use crate::cli::args::{OutputFormat, VeriNewsArgs};
use crate::error::Result;
use crate::label::Label;
use crate::ml::model::{Model, ModelArtifact};
use crate::ml::vectorizer::Norm;

/// Result structure for a classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    pub code: u8,
    pub verdict: String,
    pub normalized: String,
    pub fake_probability: f64,
    pub real_probability: f64,
}

impl From<Prediction> for ClassificationResult {
    fn from(prediction: Prediction) -> Self {
        ClassificationResult {
            label: prediction.label,
            code: prediction.label.code(),
            verdict: prediction.label.verdict().to_string(),
            real_probability: prediction.real_probability(),
            fake_probability: prediction.fake_probability,
            normalized: prediction.normalized.into_string(),
        }
    }
}

/// Result structure for normalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub normalized: String,
    pub terms: usize,
}

/// Summary of the loaded artifacts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub vectorizer_path: String,
    pub model_path: String,
    pub normalizer: Vec<String>,
    pub vocabulary_size: usize,
    pub ngram_range: (usize, usize),
    pub lowercase: bool,
    pub binary: bool,
    pub use_idf: bool,
    pub sublinear_tf: bool,
    pub norm: Norm,
    pub stop_words: usize,
    pub model: String,
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub n_estimators: Option<usize>,
    pub total_nodes: Option<usize>,
    pub max_depth: Option<usize>,
}

impl ArtifactSummary {
    /// Summarize a loaded classifier.
    pub fn new(classifier: &NewsClassifier, vectorizer_path: &Path, model_path: &Path) -> Self {
        let vectorizer = classifier.vectorizer();
        let config = vectorizer.config();
        let model = classifier.model();

        let (n_estimators, total_nodes, max_depth) = match model {
            ModelArtifact::RandomForest(forest) => (
                Some(forest.n_estimators()),
                Some(forest.trees().iter().map(|t| t.n_nodes()).sum()),
                forest.trees().iter().map(|t| t.max_depth()).max(),
            ),
            ModelArtifact::LogisticRegression(_) => (None, None, None),
        };

        ArtifactSummary {
            vectorizer_path: vectorizer_path.display().to_string(),
            model_path: model_path.display().to_string(),
            normalizer: classifier
                .normalizer()
                .stages()
                .into_iter()
                .map(str::to_string)
                .collect(),
            vocabulary_size: vectorizer.vocabulary_size(),
            ngram_range: config.ngram_range,
            lowercase: config.lowercase,
            binary: config.binary,
            use_idf: config.use_idf,
            sublinear_tf: config.sublinear_tf,
            norm: config.norm,
            stop_words: config.stop_words.as_ref().map_or(0, Vec::len),
            model: model.name().to_string(),
            n_features: model.n_features(),
            classes: model.classes().to_vec(),
            n_estimators,
            total_nodes,
            max_depth,
        }
    }
}

/// Result structure for artifact conversion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResult {
    pub input: String,
    pub output: String,
    pub kind: String,
    pub format: String,
    pub bytes_written: u64,
}

/// Output a classification.
pub fn output_classification(result: &ClassificationResult, args: &VeriNewsArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Human => {
            println!("{}", result.verdict);
            if args.verbosity() > 1 {
                println!("Normalized: {}", result.normalized);
                println!(
                    "Probability: real {:.3}, fake {:.3}",
                    result.real_probability, result.fake_probability
                );
            }
            Ok(())
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &VeriNewsArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &VeriNewsArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!("{}", "═".repeat(message.chars().count()));
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                if val.is_null() {
                    continue;
                }
                let formatted_val = format_value(&val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(&value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VeriNewsArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format bytes into human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
