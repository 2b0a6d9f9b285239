//! Token filter implementations for token transformation.
//!
//! Filters receive a token stream and produce a new one, allowing them to
//! rewrite or drop tokens. The normalizer chains them as
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer
//! ```
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//!
//! # Examples
//!
//! ```
//! use verinews::analysis::token_filter::Filter;
//! use verinews::analysis::token_filter::lowercase::LowercaseFilter;
//! use verinews::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so that analyzers holding filters can be
/// shared across threads.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> TokenStream;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stem;
pub mod stop;

pub use lowercase::LowercaseFilter;
pub use stem::{PorterMode, PorterStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
