use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};

/// A node of a regression tree: either a threshold split or a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walks from the root; rows go left when `row[feature] <= threshold`.
    /// A walk that leaves the node list or revisits too many nodes is an
    /// invalid tree, not a panic.
    pub fn evaluate(&self, row: &[f64]) -> Result<f64> {
        let mut index = 0;
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                PredictionError::InvalidModel(format!("node {} does not exist", index))
            })?;
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).ok_or_else(|| {
                        PredictionError::InvalidModel(format!(
                            "node {} splits on feature {} but the row has {} values",
                            index,
                            feature,
                            row.len()
                        ))
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
            }
        }
        Err(PredictionError::InvalidModel(
            "tree walk did not reach a leaf".to_string(),
        ))
    }

    fn validate(&self, tree_index: usize, feature_count: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(PredictionError::InvalidModel(format!(
                "tree {} has no nodes",
                tree_index
            )));
        }
        for (node_index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= feature_count {
                        return Err(PredictionError::InvalidModel(format!(
                            "tree {} node {} splits on feature {} but the model has {} features",
                            tree_index, node_index, feature, feature_count
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(PredictionError::InvalidModel(format!(
                            "tree {} node {} has a NaN threshold",
                            tree_index, node_index
                        )));
                    }
                    // Children must come later in the node list so every walk terminates.
                    for child in [*left, *right] {
                        if child <= node_index || child >= self.nodes.len() {
                            return Err(PredictionError::InvalidModel(format!(
                                "tree {} node {} has child {} out of order or out of range",
                                tree_index, node_index, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(PredictionError::InvalidModel(format!(
                            "tree {} node {} has a non-finite leaf",
                            tree_index, node_index
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Gradient-boosted ensemble of regression trees with a squared-error loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    init_prediction: f64,
    learning_rate: f64,
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
}

impl GradientBoostingRegressor {
    /// Builds an ensemble, rejecting any tree that could not be walked safely.
    pub fn new(
        init_prediction: f64,
        learning_rate: f64,
        feature_names: Vec<String>,
        trees: Vec<RegressionTree>,
    ) -> Result<Self> {
        let model = Self {
            init_prediction,
            learning_rate,
            feature_names,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PredictionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            PredictionError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        model.validate()?;
        log::debug!(
            "Loaded model from {} ({} trees, {} features)",
            path.display(),
            model.trees.len(),
            model.feature_count()
        );
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.init_prediction.is_finite() || !self.learning_rate.is_finite() {
            return Err(PredictionError::InvalidModel(
                "init_prediction and learning_rate must be finite".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(PredictionError::InvalidModel("model has no trees".to_string()));
        }
        for (tree_index, tree) in self.trees.iter().enumerate() {
            tree.validate(tree_index, self.feature_count())?;
        }
        Ok(())
    }

    /// Checks that the model was trained on exactly the given column order.
    pub fn expect_features(&self, expected: &[&str]) -> Result<()> {
        let matches = self.feature_names.len() == expected.len()
            && self
                .feature_names
                .iter()
                .zip(expected)
                .all(|(name, want)| name == want);
        if matches {
            Ok(())
        } else {
            Err(PredictionError::InvalidModel(format!(
                "feature order {:?} does not match {:?}",
                self.feature_names, expected
            )))
        }
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.feature_count() {
            return Err(PredictionError::FeatureWidth {
                expected: self.feature_count(),
                actual: row.len(),
            });
        }
        let mut boost = 0.0;
        for tree in &self.trees {
            boost += tree.evaluate(row)?;
        }
        Ok(self.init_prediction + self.learning_rate * boost)
    }
}
