//! Stemming token filter and stemmer implementations.

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

pub mod porter;

pub use porter::{PorterMode, PorterStemmer};

/// Filter that applies stemming to tokens.
#[derive(Clone)]
pub struct StemFilter {
    /// The stemmer to use.
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Porter stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Arc::new(PorterStemmer::new()),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }

    /// Get the stemmer used by this filter.
    pub fn stemmer(&self) -> &Arc<dyn Stemmer> {
        &self.stemmer
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let stemmer = Arc::clone(&self.stemmer);
        Box::new(tokens.map(move |token| {
            let stemmed = stemmer.stem(&token.text);
            token.with_text(stemmed)
        }))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stem_filter() {
        let filter = StemFilter::new();
        let tokens = vec![
            Token::new("running", 0),
            Token::new("flies", 1),
            Token::with_offsets("tested", 2, 14, 20),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "run");
        assert_eq!(result[1].text, "fli");
        assert_eq!(result[2].text, "test");
        assert_eq!(result[2].start_offset, 14);
    }

    #[test]
    fn test_custom_stemmer() {
        let filter =
            StemFilter::with_stemmer(Arc::new(PorterStemmer::with_mode(PorterMode::Original)));
        let tokens = vec![Token::new("ties", 0)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result[0].text, "ti");
        assert_eq!(filter.stemmer().name(), "porter");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StemFilter::new().name(), "stem");
    }
}
