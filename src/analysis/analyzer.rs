//! Core analyzer trait definition.
//!
//! Analyzers serve as the complete text processing pipeline:
//!
//! ```text
//! Raw Text → Analyzer → Token Stream
//!             ↓
//!        Char Filters
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1..N
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom char filter, tokenizer and filter chains
//! - [`Normalizer`](crate::normalizer::Normalizer) - The news text normalizer
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use verinews::analysis::analyzer::Analyzer;
//! use verinews::analysis::token::{Token, TokenStream};
//!
//! struct WholeTextAnalyzer;
//!
//! impl Analyzer for WholeTextAnalyzer {
//!     fn analyze(&self, text: &str) -> TokenStream {
//!         Box::new(std::iter::once(Token::new(text, 0)))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "whole_text"
//!     }
//! }
//!
//! let tokens: Vec<_> = WholeTextAnalyzer.analyze("fake news").collect();
//! assert_eq!(tokens[0].text, "fake news");
//! ```

use crate::analysis::token::TokenStream;

pub mod pipeline;

pub use pipeline::PipelineAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analysis is total: every input, including the empty string, produces a
/// (possibly empty) token stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> TokenStream;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
