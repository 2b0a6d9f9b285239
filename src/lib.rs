//! # VeriNews
//!
//! Fake news detection for Rust with pre-fitted TF-IDF models.
//!
//! ## Features
//!
//! - Text normalization: letters only, stopword removal, Porter stemming
//! - TF-IDF vectorization compatible with fitted scikit-learn vocabularies
//! - Random forest and logistic regression inference
//! - JSON and binary model artifacts
//! - A small CLI for one-off and interactive classification

pub mod analysis;
pub mod artifact;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod label;
pub mod ml;
pub mod normalizer;

pub mod prelude {
    pub use crate::classifier::{NewsClassifier, Prediction};
    pub use crate::config::VeriNewsConfig;
    pub use crate::error::{Result, VeriNewsError};
    pub use crate::label::Label;
    pub use crate::normalizer::{NormalizedText, Normalizer};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
