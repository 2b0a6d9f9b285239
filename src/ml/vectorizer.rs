//! TF-IDF vectorizer for text feature extraction.
//!
//! The vectorizer is fitted offline; this type only holds the fitted state
//! (vocabulary and IDF weights) together with the transform options that were
//! in effect during fitting, and reproduces the transform:
//!
//! 1. Analyze: optional lowercase, token pattern, optional stop words, word
//!    n-grams
//! 2. Count the terms found in the vocabulary
//! 3. Optionally clamp counts to one or damp them to `1 + ln(tf)`
//! 4. Multiply by IDF
//! 5. Normalize (L2 by default); an all-zero row stays zero
//!
//! # Examples
//!
//! ```
//! use verinews::ml::vectorizer::{TfidfVectorizer, VectorizerConfig};
//!
//! let vectorizer = TfidfVectorizer::new(
//!     vec![("fake".to_string(), 0), ("news".to_string(), 1)],
//!     vec![1.0, 1.0],
//!     VectorizerConfig::default(),
//! )
//! .unwrap();
//!
//! let features = vectorizer.transform("fake fake");
//! assert_eq!(features.dimension(), 2);
//! assert_eq!(features.get(0), 1.0);
//! assert_eq!(features.get(1), 0.0);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::{DEFAULT_TOKEN_PATTERN, RegexTokenizer};
use crate::artifact::ArtifactKind;
use crate::error::{Result, VeriNewsError};
use crate::ml::feature::FeatureVector;

/// Row normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Divide by the Euclidean norm.
    #[default]
    L2,
    /// Divide by the sum of absolute values.
    L1,
    /// Leave the weights as they are.
    None,
}

/// Transform options recorded when the vectorizer was fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Lowercase tokens before lookup.
    pub lowercase: bool,
    /// Regular expression whose matches are the tokens.
    pub token_pattern: String,
    /// Inclusive range of word n-gram lengths.
    pub ngram_range: (usize, usize),
    /// Stop words removed before n-grams are built.
    pub stop_words: Option<Vec<String>>,
    /// Use presence (1) instead of counts.
    pub binary: bool,
    /// Multiply by the inverse document frequency.
    pub use_idf: bool,
    /// Replace tf with `1 + ln(tf)`.
    pub sublinear_tf: bool,
    /// Row normalization.
    pub norm: Norm,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        VectorizerConfig {
            lowercase: true,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            ngram_range: (1, 1),
            stop_words: None,
            binary: false,
            use_idf: true,
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }
}

/// Serialized form of a fitted vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Term to column index.
    pub vocabulary: BTreeMap<String, usize>,
    /// IDF weight per column.
    pub idf: Vec<f64>,
    /// Transform options.
    #[serde(default)]
    pub config: VectorizerConfig,
}

/// A fitted TF-IDF vectorizer.
#[derive(Clone)]
pub struct TfidfVectorizer {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
    config: VectorizerConfig,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

fn invalid(msg: impl Into<String>) -> VeriNewsError {
    VeriNewsError::invalid_artifact(ArtifactKind::Vectorizer, msg)
}

impl TfidfVectorizer {
    /// Build a vectorizer from fitted state, validating it.
    pub fn new<I>(vocabulary: I, idf: Vec<f64>, config: VectorizerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let vocabulary: AHashMap<String, usize> = vocabulary.into_iter().collect();

        if vocabulary.is_empty() {
            return Err(invalid("vocabulary is empty"));
        }
        if idf.len() != vocabulary.len() {
            return Err(invalid(format!(
                "idf has {} entries but the vocabulary has {} terms",
                idf.len(),
                vocabulary.len()
            )));
        }

        let mut seen = vec![false; idf.len()];
        for (term, &index) in &vocabulary {
            if index >= idf.len() {
                return Err(invalid(format!(
                    "term '{term}' maps to column {index}, outside 0..{}",
                    idf.len()
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(invalid(format!("column {index} is assigned to two terms")));
            }
        }

        if let Some(pos) = idf.iter().position(|w| !w.is_finite()) {
            return Err(invalid(format!("idf weight at column {pos} is not finite")));
        }

        let (min_n, max_n) = config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!("invalid ngram_range ({min_n}, {max_n})")));
        }

        let analyzer = Arc::new(Self::build_analyzer(&config)?);

        Ok(TfidfVectorizer {
            vocabulary,
            idf,
            config,
            analyzer,
        })
    }

    /// Build a vectorizer from its serialized form.
    pub fn from_params(params: VectorizerParams) -> Result<Self> {
        Self::new(params.vocabulary, params.idf, params.config)
    }

    /// Get the serialized form of this vectorizer.
    pub fn to_params(&self) -> VectorizerParams {
        VectorizerParams {
            vocabulary: self
                .vocabulary
                .iter()
                .map(|(term, &index)| (term.clone(), index))
                .collect(),
            idf: self.idf.clone(),
            config: self.config.clone(),
        }
    }

    fn build_analyzer(config: &VectorizerConfig) -> Result<PipelineAnalyzer> {
        let tokenizer = RegexTokenizer::with_pattern(&config.token_pattern)
            .map_err(|e| invalid(format!("token_pattern: {e}")))?;

        let mut analyzer = PipelineAnalyzer::new(Arc::new(tokenizer)).with_name("tfidf");
        if config.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if let Some(stop_words) = &config.stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(stop_words.clone())));
        }
        Ok(analyzer)
    }

    /// Produce the terms counted for `text`, including n-grams.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = self.analyzer.analyze(text).map(|t| t.text).collect();
        word_ngrams(tokens, self.config.ngram_range)
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let weighted = counts.into_iter().map(|(index, count)| {
            let mut tf = if self.config.binary { 1.0 } else { count };
            if self.config.sublinear_tf {
                tf = 1.0 + tf.ln();
            }
            if self.config.use_idf {
                tf *= self.idf[index];
            }
            (index, tf)
        });

        let mut features = FeatureVector::from_entries(self.dimension(), weighted);
        match self.config.norm {
            Norm::L2 => {
                let norm = features.l2_norm();
                features.scale_down(norm);
            }
            Norm::L1 => {
                let norm = features.l1_norm();
                features.scale_down(norm);
            }
            Norm::None => {}
        }
        features
    }

    /// Number of columns of the produced vectors.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Look up the column of a term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weights by column.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Get the transform options.
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Terms ordered by column index.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.dimension()];
        for (term, &index) in &self.vocabulary {
            names[index] = term.as_str();
        }
        names
    }
}

/// Expand tokens into word n-grams, shortest first.
fn word_ngrams(tokens: Vec<String>, (min_n, max_n): (usize, usize)) -> Vec<String> {
    if max_n == 1 {
        return tokens;
    }

    let mut terms = if min_n == 1 { tokens.clone() } else { Vec::new() };
    for n in min_n.max(2)..=max_n.min(tokens.len()) {
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}
