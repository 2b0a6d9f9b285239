//! Lowercase filter implementation.
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
use crate::analysis::token_filter::Filter;

/// A filter that converts tokens to lowercase.
///
/// ASCII text takes the fast path; anything else goes through Unicode
/// lowercasing. Stopped tokens pass through untouched.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }

    /// Lowercase a single word.
    pub fn lowercase(word: &str) -> String {
        if word.is_ascii() {
            word.to_ascii_lowercase()
        } else {
            word.to_lowercase()
        }
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        Box::new(tokens.map(|token| {
            let lowered = Self::lowercase(&token.text);
            token.with_text(lowered)
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
