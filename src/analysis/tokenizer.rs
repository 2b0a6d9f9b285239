//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-producing step of the analysis pipeline.
//! Construction may fail (an invalid pattern, for instance) but tokenizing is
//! total: any string yields a possibly empty stream.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`regex::RegexTokenizer`] - Extracts regex matches as tokens
//!
//! # Examples
//!
//! ```
//! use verinews::analysis::tokenizer::Tokenizer;
//! use verinews::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod whitespace;
