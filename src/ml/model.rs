//! Model trait and the serialized model artifact.
//!
//! Models are binary classifiers over the vectorizer's feature space. They
//! are fitted offline and only predict here.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactKind;
use crate::error::{Result, VeriNewsError};
use crate::ml::feature::FeatureVector;
use crate::ml::forest::RandomForest;
use crate::ml::linear::LogisticRegression;

/// Trait for fitted classifiers.
///
/// Implementations are immutable after loading, so one instance can serve
/// concurrent callers without locking.
pub trait Model: Send + Sync {
    /// Number of input features the model was fitted on.
    fn n_features(&self) -> usize;

    /// Class codes, in the order of [`Model::predict_proba`]'s output.
    fn classes(&self) -> &[i64];

    /// Class probabilities, one per entry of [`Model::classes`].
    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64>;

    /// Index into [`Model::classes`] of the predicted class.
    fn predict(&self, x: &FeatureVector) -> usize {
        argmax(&self.predict_proba(x))
    }

    /// Get the name of this model (for logging and inspection).
    fn name(&self) -> &'static str;
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = i;
        }
    }
    best
}

/// Check that a model separates exactly the classes 0 and 1.
pub(crate) fn validate_classes(classes: &[i64]) -> Result<()> {
    let mut sorted = classes.to_vec();
    sorted.sort_unstable();
    if sorted != [0, 1] {
        return Err(VeriNewsError::invalid_artifact(
            ArtifactKind::Model,
            format!("expected the classes [0, 1], found {classes:?}"),
        ));
    }
    Ok(())
}

/// A fitted model as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl ModelArtifact {
    /// Check the internal consistency of the fitted parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::RandomForest(forest) => forest.validate(),
            ModelArtifact::LogisticRegression(linear) => linear.validate(),
        }
    }

    fn inner(&self) -> &dyn Model {
        match self {
            ModelArtifact::RandomForest(forest) => forest as &dyn Model,
            ModelArtifact::LogisticRegression(linear) => linear as &dyn Model,
        }
    }
}

impl From<RandomForest> for ModelArtifact {
    fn from(forest: RandomForest) -> Self {
        ModelArtifact::RandomForest(forest)
    }
}

impl From<LogisticRegression> for ModelArtifact {
    fn from(linear: LogisticRegression) -> Self {
        ModelArtifact::LogisticRegression(linear)
    }
}

impl Model for ModelArtifact {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn classes(&self) -> &[i64] {
        self.inner().classes()
    }

    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        self.inner().predict_proba(x)
    }

    fn predict(&self, x: &FeatureVector) -> usize {
        self.inner().predict(x)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}
