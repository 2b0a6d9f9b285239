//! Text analysis module for VeriNews.
//!
//! This module provides the text analysis building blocks the normalizer and
//! the TF-IDF vectorizer are made of: char filters, tokenizers, token filters
//! and the analyzers that chain them.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
