//! Runtime configuration.
//!
//! The configuration only says where the fitted artifacts live. It can be
//! read from a JSON file, and the CLI lets flags and environment variables
//! override individual fields.
//!
//! ```json
//! {
//!   "vectorizer_path": "models/vectorizer.json",
//!   "model_path": "models/random_forest.json",
//!   "format": "json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactFormat;
use crate::error::{Result, VeriNewsError};

/// Default location of the vectorizer artifact.
pub const DEFAULT_VECTORIZER_PATH: &str = "models/vectorizer.json";

/// Default location of the model artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/random_forest.json";

/// Where to find the fitted artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeriNewsConfig {
    /// Path of the fitted TF-IDF vectorizer.
    pub vectorizer_path: PathBuf,

    /// Path of the fitted classifier.
    pub model_path: PathBuf,

    /// Encoding of both artifacts; detected per file when unset.
    pub format: Option<ArtifactFormat>,
}

impl Default for VeriNewsConfig {
    fn default() -> Self {
        VeriNewsConfig {
            vectorizer_path: PathBuf::from(DEFAULT_VECTORIZER_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            format: None,
        }
    }
}

impl VeriNewsConfig {
    /// Read a configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VeriNewsError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            VeriNewsError::config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Set the vectorizer path.
    pub fn with_vectorizer_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.vectorizer_path = path.into();
        self
    }

    /// Set the model path.
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = path.into();
        self
    }

    /// Force the artifact encoding.
    pub fn with_format(mut self, format: ArtifactFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = VeriNewsConfig::default();
        assert_eq!(config.vectorizer_path, PathBuf::from("models/vectorizer.json"));
        assert_eq!(config.model_path, PathBuf::from("models/random_forest.json"));
        assert_eq!(config.format, None);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"model_path": "other/model.bin", "format": "binary"}}"#).unwrap();

        let config = VeriNewsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.vectorizer_path, PathBuf::from(DEFAULT_VECTORIZER_PATH));
        assert_eq!(config.model_path, PathBuf::from("other/model.bin"));
        assert_eq!(config.format, Some(ArtifactFormat::Binary));
    }

    #[test]
    fn test_from_file_errors() {
        let err = VeriNewsConfig::from_file("/nonexistent/verinews.json").unwrap_err();
        assert!(matches!(err, VeriNewsError::Config(_)));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = VeriNewsConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, VeriNewsError::Config(_)));
    }

    #[test]
    fn test_builders() {
        let config = VeriNewsConfig::default()
            .with_vectorizer_path("a.json")
            .with_model_path("b.bin")
            .with_format(ArtifactFormat::Json);

        assert_eq!(config.vectorizer_path, PathBuf::from("a.json"));
        assert_eq!(config.model_path, PathBuf::from("b.bin"));
        assert_eq!(config.format, Some(ArtifactFormat::Json));
    }
}
