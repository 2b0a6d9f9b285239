//! News text normalization.
//!
//! The [`Normalizer`] turns arbitrary user text into the canonical form the
//! vectorizer was fitted on:
//!
//! ```text
//! "[^a-zA-Z]" → " "  →  whitespace split  →  lowercase  →  English stop words  →  Porter (NLTK)
//! ```
//!
//! and joins the surviving stems with single spaces. Normalization is total:
//! empty input, punctuation-only input and stopword-only input all produce an
//! empty [`NormalizedText`].
//!
//! # Examples
//!
//! ```
//! use verinews::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! let normalized = normalizer.normalize("Scientists confirm water is wet!!!");
//!
//! assert_eq!(normalized.as_str(), "scientist confirm water wet");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::{PorterMode, PorterStemmer, StemFilter};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

/// Text after normalization: lowercase ASCII stems joined by single spaces.
///
/// Never has leading, trailing or repeated spaces. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Build a normalized text from already-normalized terms.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for term in terms {
            let term = term.as_ref();
            if term.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(term);
        }
        NormalizedText(text)
    }

    /// Get the normalized text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether normalization left nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the stems.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|term| !term.is_empty())
    }

    /// Consume the wrapper and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NormalizedText> for String {
    fn from(text: NormalizedText) -> Self {
        text.0
    }
}

/// The news text normalizer.
///
/// A fixed [`PipelineAnalyzer`] preset. Holds no mutable state, so one
/// instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct Normalizer {
    inner: PipelineAnalyzer,
}

impl Normalizer {
    /// Create the normalizer the news models were fitted with.
    pub fn new() -> Self {
        Self::with_porter_mode(PorterMode::NltkExtensions)
    }

    /// Create a normalizer whose stemmer uses the given Porter rule set.
    pub fn with_porter_mode(mode: PorterMode) -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::letters_only()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(StemFilter::with_stemmer(Arc::new(
                PorterStemmer::with_mode(mode),
            ))))
            .with_name("news_normalizer");

        Normalizer { inner }
    }

    /// Normalize raw text.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        NormalizedText::from_terms(self.inner.analyze(text).map(|token| token.text))
    }

    /// Get the underlying analysis pipeline.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    /// Names of the pipeline stages in the order they run.
    pub fn stages(&self) -> Vec<&'static str> {
        let pipeline = self.pipeline();
        pipeline
            .char_filters()
            .iter()
            .map(|f| f.name())
            .chain(std::iter::once(pipeline.tokenizer().name()))
            .chain(pipeline.filters().iter().map(|f| f.name()))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for Normalizer {
    fn analyze(&self, text: &str) -> TokenStream {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "news_normalizer"
    }
}
