//! The news classifier.
//!
//! [`NewsClassifier`] owns the three stages of the pipeline:
//!
//! ```text
//! raw text → Normalizer → NormalizedText → TfidfVectorizer → FeatureVector → Model → Label
//! ```
//!
//! Artifacts are loaded once, before the first request; afterwards
//! classification cannot fail and needs no locking, so one classifier can be
//! shared between threads behind an `Arc`.
//!
//! # Examples
//!
//! ```no_run
//! use verinews::classifier::NewsClassifier;
//! use verinews::config::VeriNewsConfig;
//!
//! let classifier = NewsClassifier::load(&VeriNewsConfig::default()).unwrap();
//! let label = classifier.classify_news("Scientists confirm water is wet!!!");
//! println!("{label}");
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::artifact::{self, ArtifactKind};
use crate::config::VeriNewsConfig;
use crate::error::{Result, VeriNewsError};
use crate::label::Label;
use crate::ml::model::{Model, ModelArtifact};
use crate::ml::vectorizer::TfidfVectorizer;
use crate::normalizer::{NormalizedText, Normalizer};

/// Full outcome of classifying one news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label.
    pub label: Label,
    /// Text the vectorizer saw.
    pub normalized: NormalizedText,
    /// Model probability that the news is fake.
    pub fake_probability: f64,
}

impl Prediction {
    /// Model probability that the news is real.
    pub fn real_probability(&self) -> f64 {
        1.0 - self.fake_probability
    }

    /// Probability of the predicted label.
    pub fn confidence(&self) -> f64 {
        match self.label {
            Label::Real => self.real_probability(),
            Label::Fake => self.fake_probability,
        }
    }
}

/// Fake news classifier built from a fitted vectorizer and a fitted model.
#[derive(Debug, Clone)]
pub struct NewsClassifier {
    normalizer: Normalizer,
    vectorizer: TfidfVectorizer,
    model: ModelArtifact,
    /// Label of each model class index.
    labels: Vec<Label>,
}

impl NewsClassifier {
    /// Combine a vectorizer and a model.
    ///
    /// Fails when the model parameters are inconsistent, when the model was
    /// fitted on a different number of features than the vectorizer
    /// produces, or when its classes are not 0 and 1.
    pub fn new(vectorizer: TfidfVectorizer, model: ModelArtifact) -> Result<Self> {
        model.validate()?;
        if model.n_features() != vectorizer.dimension() {
            return Err(VeriNewsError::invalid_artifact(
                ArtifactKind::Model,
                format!(
                    "model expects {} features but the vectorizer produces {}",
                    model.n_features(),
                    vectorizer.dimension()
                ),
            ));
        }

        let labels = model
            .classes()
            .iter()
            .map(|&code| Label::from_code(code))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| VeriNewsError::invalid_artifact(ArtifactKind::Model, e.to_string()))?;

        Ok(NewsClassifier {
            normalizer: Normalizer::new(),
            vectorizer,
            model,
            labels,
        })
    }

    /// Load both artifacts named by `config`.
    ///
    /// Any failure is reported with the kind and path of the artifact that
    /// could not be used.
    pub fn load(config: &VeriNewsConfig) -> Result<Self> {
        let vectorizer: TfidfVectorizer = artifact::load(&config.vectorizer_path, config.format)?;
        let model: ModelArtifact = artifact::load(&config.model_path, config.format)?;

        Self::new(vectorizer, model).map_err(|e| e.at_path(ArtifactKind::Model, &config.model_path))
    }

    /// Replace the normalizer.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Classify already-normalized text.
    pub fn classify(&self, text: &NormalizedText) -> Label {
        let features = self.vectorizer.transform(text.as_str());
        let label = self.labels[self.model.predict(&features)];
        debug!(
            "Classified {} terms ({} known) as {label}",
            text.terms().count(),
            features.nnz()
        );
        label
    }

    /// Normalize and classify raw text.
    pub fn classify_news(&self, raw: &str) -> Label {
        self.classify(&self.normalizer.normalize(raw))
    }

    /// Normalize and classify raw text, keeping the intermediate results.
    pub fn predict(&self, raw: &str) -> Prediction {
        let normalized = self.normalizer.normalize(raw);
        let features = self.vectorizer.transform(normalized.as_str());

        let label = self.labels[self.model.predict(&features)];
        let fake_probability = self
            .model
            .predict_proba(&features)
            .iter()
            .zip(&self.labels)
            .filter(|(_, label)| label.is_fake())
            .map(|(p, _)| p)
            .sum::<f64>();

        debug!("Predicted {label} with P(fake) = {fake_probability:.4}");
        Prediction {
            label,
            normalized,
            fake_probability,
        }
    }

    /// Get the normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Get the vectorizer.
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Get the model.
    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }
}
