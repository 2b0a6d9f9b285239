//! Error types for VeriNews.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`VeriNewsError`] enum. Most failures happen at startup while the model
//! artifacts are loaded; normalization and classification themselves never
//! fail once a [`crate::classifier::NewsClassifier`] exists.
//!
//! # Examples
//!
//! ```
//! use verinews::error::{Result, VeriNewsError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VeriNewsError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::artifact::ArtifactKind;

/// The main error type for VeriNews operations.
#[derive(Error, Debug)]
pub enum VeriNewsError {
    /// I/O errors (reading config files, stdin, writing artifacts)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (invalid patterns, tokenizer setup)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A model artifact could not be loaded or written.
    #[error("Failed to load {kind} artifact from {}: {message}", path.display())]
    Artifact {
        kind: ArtifactKind,
        path: PathBuf,
        message: String,
    },

    /// An artifact decoded fine but its contents are inconsistent.
    #[error("Invalid {kind} artifact: {message}")]
    InvalidArtifact { kind: ArtifactKind, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Classification was requested for empty or whitespace-only input.
    #[error("Please enter the news text before requesting a prediction")]
    EmptyInput,

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VeriNewsError.
pub type Result<T> = std::result::Result<T, VeriNewsError>;

impl VeriNewsError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VeriNewsError::Analysis(msg.into())
    }

    /// Create a new artifact loading error for the artifact at `path`.
    pub fn artifact<P: AsRef<Path>, S: Into<String>>(kind: ArtifactKind, path: P, msg: S) -> Self {
        VeriNewsError::Artifact {
            kind,
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create a new artifact validation error.
    pub fn invalid_artifact<S: Into<String>>(kind: ArtifactKind, msg: S) -> Self {
        VeriNewsError::InvalidArtifact {
            kind,
            message: msg.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        VeriNewsError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VeriNewsError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VeriNewsError::Other(msg.into())
    }

    /// Attach the artifact path to an error raised while reading it.
    ///
    /// Errors that already name an artifact path are returned unchanged.
    pub fn at_path<P: AsRef<Path>>(self, kind: ArtifactKind, path: P) -> Self {
        match self {
            VeriNewsError::Artifact { .. } => self,
            VeriNewsError::InvalidArtifact { message, .. } => {
                VeriNewsError::artifact(kind, path, message)
            }
            other => VeriNewsError::artifact(kind, path, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = VeriNewsError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");

        let error = VeriNewsError::config("missing field");
        assert_eq!(error.to_string(), "Configuration error: missing field");

        let error = VeriNewsError::invalid_argument("Invalid input");
        assert_eq!(error.to_string(), "Invalid argument: Invalid input");
    }

    #[test]
    fn test_artifact_error_names_kind_and_path() {
        let error = VeriNewsError::artifact(
            ArtifactKind::Model,
            "models/random_forest.json",
            "unexpected end of file",
        );
        assert_eq!(
            error.to_string(),
            "Failed to load model artifact from models/random_forest.json: unexpected end of file"
        );
    }

    #[test]
    fn test_at_path_wraps_validation_error() {
        let error = VeriNewsError::invalid_artifact(ArtifactKind::Vectorizer, "idf is empty")
            .at_path(ArtifactKind::Vectorizer, "vec.json");

        match error {
            VeriNewsError::Artifact { kind, path, message } => {
                assert_eq!(kind, ArtifactKind::Vectorizer);
                assert_eq!(path, PathBuf::from("vec.json"));
                assert_eq!(message, "idf is empty");
            }
            _ => panic!("Expected artifact error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = VeriNewsError::from(io_error);

        match error {
            VeriNewsError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
