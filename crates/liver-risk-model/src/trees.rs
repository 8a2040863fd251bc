//! Additive tree ensembles (gradient boosted trees)
//!
//! Trees are stored as flat node arrays with the root at index 0. A split
//! sends a row left when `x[feature] < threshold`; NaN follows the node's
//! default direction. The ensemble output is `base_score + Σ leaf`, passed
//! through a sigmoid for the binary-logistic objective.

use crate::linear::sigmoid;
use crate::model::{Capability, ClassProbabilities, Prediction, RiskModel};
use liver_risk_core::{FeatureMatrix, FeatureVector, Result, FEATURE_COUNT};

/// A single tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        default_left: bool,
    },
    Leaf(f64),
}

/// Immutable decision tree
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Build a tree, checking structure.
    ///
    /// Children must point strictly forward, which rules out cycles and
    /// guarantees traversal terminates.
    pub fn new(nodes: Vec<Node>) -> std::result::Result<Self, String> {
        if nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (id, node) in nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                left,
                right,
                threshold,
                ..
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    return Err(format!(
                        "node {id}: feature index {feature} out of range (< {FEATURE_COUNT})"
                    ));
                }
                if threshold.is_nan() {
                    return Err(format!("node {id}: threshold is NaN"));
                }
                for child in [*left, *right] {
                    if child <= id || child >= nodes.len() {
                        return Err(format!("node {id}: invalid child index {child}"));
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    /// Walk from the root to a leaf and return its value
    pub fn predict_row(&self, row: &FeatureVector) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = row.as_slice()[*feature];
                    let go_left = if x.is_nan() { *default_left } else { x < *threshold };
                    id = if go_left { *left } else { *right };
                }
            }
        }
    }
}

/// Learning objective the ensemble was trained with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Margin output, sigmoid gives the positive-class probability
    BinaryLogistic,
    /// Raw additive output
    Regression,
}

/// Sum-of-trees model
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    name: String,
    objective: Objective,
    base_score: f64,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn new(name: impl Into<String>, objective: Objective, base_score: f64, trees: Vec<Tree>) -> Self {
        Self {
            name: name.into(),
            objective,
            base_score,
            trees,
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn margin(&self, row: &FeatureVector) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>()
    }
}

impl RiskModel for TreeEnsemble {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        match self.objective {
            Objective::BinaryLogistic => Capability::Probabilities,
            Objective::Regression => Capability::PointPrediction,
        }
    }

    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<ClassProbabilities>> {
        match self.objective {
            Objective::BinaryLogistic => Ok(features
                .rows()
                .map(|row| ClassProbabilities::binary(sigmoid(self.margin(row))))
                .collect()),
            Objective::Regression => Err(liver_risk_core::Error::inference(format!(
                "regression ensemble '{}' does not produce class probabilities",
                self.name
            ))),
        }
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        Ok(features
            .rows()
            .map(|row| {
                let margin = self.margin(row);
                match self.objective {
                    Objective::BinaryLogistic => {
                        Prediction::Numeric(if sigmoid(margin) >= 0.5 { 1.0 } else { 0.0 })
                    }
                    Objective::Regression => Prediction::Numeric(margin),
                }
            })
            .collect())
    }
}
