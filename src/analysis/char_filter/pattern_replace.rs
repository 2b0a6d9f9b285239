use regex::Regex;

use super::CharFilter;
use crate::error::{Result, VeriNewsError};

/// Pattern matching every character outside the ASCII letters.
pub const NON_ASCII_LETTER_PATTERN: &str = "[^a-zA-Z]";

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| VeriNewsError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Filter that turns each non-letter character into a single space.
    ///
    /// Digits, punctuation, accented letters and symbols all count as
    /// non-letters. Multi-byte characters become one space each.
    pub fn letters_only() -> Self {
        Self {
            pattern: Regex::new(NON_ASCII_LETTER_PATTERN).expect("letter pattern is valid"),
            replacement: " ".to_string(),
        }
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"(\d+)", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_remove_pattern() {
        let filter = PatternReplaceCharFilter::new(r"-", "").unwrap();
        assert_eq!(filter.filter("123-456-789"), "123456789");
    }

    #[test]
    fn test_letters_only() {
        let filter = PatternReplaceCharFilter::letters_only();
        assert_eq!(filter.filter("100% TRUE!"), "     TRUE ");
        assert_eq!(filter.filter("it's"), "it s");
    }

    #[test]
    fn test_letters_only_replaces_each_accented_char_once() {
        let filter = PatternReplaceCharFilter::letters_only();
        assert_eq!(filter.filter("café"), "caf ");
        assert_eq!(filter.filter("naïve"), "na ve");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new("[unclosed", " ").is_err());
    }
}
