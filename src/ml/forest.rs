//! Random forest of decision trees.
//!
//! Trees use the flat array layout of the fitting library: node `i` is a
//! leaf when `children_left[i] == -1`, otherwise samples with
//! `x[feature[i]] <= threshold[i]` go to `children_left[i]` and the others to
//! `children_right[i]`. `value[i]` holds the per-class sample weights that
//! reached the node.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactKind;
use crate::error::{Result, VeriNewsError};
use crate::ml::feature::FeatureVector;
use crate::ml::model::{Model, validate_classes};

/// Marker in `children_left` for leaf nodes.
pub const TREE_LEAF: i64 = -1;

fn invalid(msg: impl Into<String>) -> VeriNewsError {
    VeriNewsError::invalid_artifact(ArtifactKind::Model, msg)
}

/// A single fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Create a tree from its node arrays.
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<Vec<f64>>,
    ) -> Self {
        DecisionTree {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        }
    }

    /// A tree made of a single leaf.
    pub fn leaf(value: Vec<f64>) -> Self {
        Self::new(vec![TREE_LEAF], vec![TREE_LEAF], vec![-2], vec![-2.0], vec![value])
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.children_left.iter().filter(|&&c| c == TREE_LEAF).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn max_depth(&self) -> usize {
        let mut depth = vec![0usize; self.n_nodes()];
        let mut max_depth = 0;
        // children always come after their parent
        for node in 0..self.n_nodes() {
            if self.children_left[node] != TREE_LEAF {
                for child in [self.children_left[node], self.children_right[node]] {
                    depth[child as usize] = depth[node] + 1;
                    max_depth = max_depth.max(depth[node] + 1);
                }
            }
        }
        max_depth
    }

    /// Check the node arrays against the forest's shape.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(invalid("tree has no nodes"));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n_nodes)
        {
            return Err(invalid("tree node arrays differ in length"));
        }

        for node in 0..n_nodes {
            let row = &self.value[node];
            if row.len() != n_classes {
                return Err(invalid(format!(
                    "node {node} has {} class values, expected {n_classes}",
                    row.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(invalid(format!("node {node} has an invalid class value")));
            }

            if self.children_left[node] == TREE_LEAF {
                if row.iter().sum::<f64>() <= 0.0 {
                    return Err(invalid(format!("leaf {node} has no weight")));
                }
                continue;
            }

            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child >= n_nodes as i64 {
                    return Err(invalid(format!(
                        "node {node} points to invalid child {child}"
                    )));
                }
            }

            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(invalid(format!(
                    "node {node} splits on feature {feature}, outside 0..{n_features}"
                )));
            }
            if !self.threshold[node].is_finite() {
                return Err(invalid(format!("node {node} has a non-finite threshold")));
            }
        }

        Ok(())
    }

    /// Index of the leaf `x` falls into.
    pub fn apply(&self, x: &FeatureVector) -> usize {
        let mut node = 0;
        while self.children_left[node] != TREE_LEAF {
            // the fitting library compares features at single precision
            let value = x.get(self.feature[node] as usize) as f32 as f64;
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Class probabilities: the leaf values normalized to sum to one.
    pub fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let row = &self.value[self.apply(x)];
        let total: f64 = row.iter().sum();
        row.iter().map(|v| v / total).collect()
    }
}

/// A fitted random forest classifier.
///
/// The forest probability is the mean of the tree probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Create a forest from fitted trees.
    pub fn new(n_features: usize, classes: Vec<i64>, trees: Vec<DecisionTree>) -> Result<Self> {
        let forest = RandomForest {
            n_features,
            classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Check the forest and every tree in it.
    pub fn validate(&self) -> Result<()> {
        validate_classes(&self.classes)?;
        if self.n_features == 0 {
            return Err(invalid("n_features must be positive"));
        }
        if self.trees.is_empty() {
            return Err(invalid("forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| match e {
                    VeriNewsError::InvalidArtifact { kind, message } => {
                        VeriNewsError::InvalidArtifact {
                            kind,
                            message: format!("tree {i}: {message}"),
                        }
                    }
                    other => other,
                })?;
        }
        Ok(())
    }

    /// Get the trees.
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Number of trees.
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

impl Model for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (sum, p) in proba.iter_mut().zip(tree.predict_proba(x)) {
                *sum += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}
