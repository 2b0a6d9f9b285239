//! Logistic regression classifier.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactKind;
use crate::error::{Result, VeriNewsError};
use crate::ml::feature::FeatureVector;
use crate::ml::model::{Model, validate_classes};

/// A fitted binary logistic regression.
///
/// The decision function is `w · x + b`; the probability of `classes[1]` is
/// its sigmoid and `classes[1]` is predicted when the decision is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    classes: Vec<i64>,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Create a logistic regression from fitted parameters.
    pub fn new(classes: Vec<i64>, coef: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = LogisticRegression {
            classes,
            coef,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check the fitted parameters.
    pub fn validate(&self) -> Result<()> {
        validate_classes(&self.classes)?;
        if self.coef.is_empty() {
            return Err(VeriNewsError::invalid_artifact(
                ArtifactKind::Model,
                "coef is empty",
            ));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|w| !w.is_finite()) {
            return Err(VeriNewsError::invalid_artifact(
                ArtifactKind::Model,
                "weights must be finite",
            ));
        }
        Ok(())
    }

    /// Signed distance to the separating hyperplane.
    pub fn decision_function(&self, x: &FeatureVector) -> f64 {
        x.dot(&self.coef) + self.intercept
    }

    /// Get the weights.
    pub fn coef(&self) -> &[f64] {
        &self.coef
    }

    /// Get the bias.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Model for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let p = sigmoid(self.decision_function(x));
        vec![1.0 - p, p]
    }

    fn predict(&self, x: &FeatureVector) -> usize {
        usize::from(self.decision_function(x) > 0.0)
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}
