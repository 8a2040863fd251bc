//! Model artifact format
//!
//! A trained estimator is exported out-of-band as a JSON document:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "liver-disease-lr",
//!   "feature_names": ["age", "gender", "bmi", "alcohol", "smoking", "geneticRisk",
//!                     "physicalActivity", "diabetes", "hypertension", "liverFunctionTest"],
//!   "model": { "type": "logistic-regression", "coefficients": [...], "intercept": -3.2 }
//! }
//! ```

use crate::linear::{LinearRegression, LogisticRegression, StandardScaler};
use crate::model::RiskModel;
use crate::rules::{ConstantModel, ConstantOutput, ThresholdLabel};
use crate::trees::{Node, Objective, Tree, TreeEnsemble};
use liver_risk_core::Field;
use serde::{Deserialize, Serialize};

/// Artifact format version understood by this crate
pub const FORMAT_VERSION: u32 = 1;

/// Top-level artifact document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact format version
    pub format_version: u32,

    /// Model name
    #[serde(default)]
    pub name: String,

    /// Model description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Column order the model was trained on, checked against the canonical order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    /// The estimator itself
    pub model: ModelSpec,
}

/// Estimator definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModelSpec {
    /// Binary logistic regression (class probabilities)
    LogisticRegression {
        coefficients: Vec<f64>,
        #[serde(default)]
        intercept: f64,
        #[serde(default)]
        scaler: Option<ScalerSpec>,
    },

    /// Linear regression (numeric point prediction)
    LinearRegression {
        coefficients: Vec<f64>,
        #[serde(default)]
        intercept: f64,
        #[serde(default)]
        scaler: Option<ScalerSpec>,
    },

    /// Additive tree ensemble
    TreeEnsemble {
        objective: ObjectiveSpec,
        #[serde(default)]
        base_score: f64,
        trees: Vec<TreeSpec>,
    },

    /// Single-feature rule emitting `labels[0]` below the threshold, else `labels[1]`
    ThresholdLabel {
        feature: String,
        threshold: f64,
        labels: Vec<String>,
    },

    /// Fixed output; exactly one of the three fields must be set
    Constant {
        #[serde(default)]
        probability: Option<f64>,
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        label: Option<String>,
    },
}

/// Standardization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSpec {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveSpec {
    BinaryLogistic,
    Regression,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

/// Tree node, either `{"leaf": v}` or a split
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default = "default_true")]
        default_left: bool,
    },
}

fn default_true() -> bool {
    true
}

impl ModelArtifact {
    /// Parse an artifact from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Check the header and build the estimator it describes
    pub fn build(self) -> Result<Box<dyn RiskModel>, String> {
        if self.format_version != FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {FORMAT_VERSION})",
                self.format_version
            ));
        }
        if let Some(names) = &self.feature_names {
            check_feature_order(names)?;
        }

        let name = if self.name.is_empty() {
            "unnamed".to_string()
        } else {
            self.name
        };

        let model: Box<dyn RiskModel> = match self.model {
            ModelSpec::LogisticRegression {
                coefficients,
                intercept,
                scaler,
            } => Box::new(LogisticRegression::new(
                name,
                &coefficients,
                intercept,
                build_scaler(scaler)?,
            )?),
            ModelSpec::LinearRegression {
                coefficients,
                intercept,
                scaler,
            } => Box::new(LinearRegression::new(
                name,
                &coefficients,
                intercept,
                build_scaler(scaler)?,
            )?),
            ModelSpec::TreeEnsemble {
                objective,
                base_score,
                trees,
            } => {
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, spec)| build_tree(spec).map_err(|e| format!("tree {i}: {e}")))
                    .collect::<Result<Vec<_>, _>>()?;
                if trees.is_empty() {
                    return Err("tree-ensemble has no trees".to_string());
                }
                let objective = match objective {
                    ObjectiveSpec::BinaryLogistic => Objective::BinaryLogistic,
                    ObjectiveSpec::Regression => Objective::Regression,
                };
                Box::new(TreeEnsemble::new(name, objective, base_score, trees))
            }
            ModelSpec::ThresholdLabel {
                feature,
                threshold,
                labels,
            } => {
                let field = Field::from_name(&feature)
                    .ok_or_else(|| format!("unknown feature '{feature}'"))?;
                let [below, at_or_above]: [String; 2] = labels
                    .try_into()
                    .map_err(|l: Vec<String>| format!("threshold-label needs 2 labels, got {}", l.len()))?;
                Box::new(ThresholdLabel::new(name, field, threshold, below, at_or_above))
            }
            ModelSpec::Constant {
                probability,
                value,
                label,
            } => {
                let output = match (probability, value, label) {
                    (Some(p), None, None) => {
                        if !(0.0..=1.0).contains(&p) {
                            return Err(format!("constant probability {p} outside [0, 1]"));
                        }
                        ConstantOutput::Probability(p)
                    }
                    (None, Some(v), None) => ConstantOutput::Value(v),
                    (None, None, Some(l)) => ConstantOutput::Label(l),
                    _ => {
                        return Err(
                            "constant needs exactly one of probability, value or label".to_string()
                        )
                    }
                };
                Box::new(ConstantModel::new(name, output))
            }
        };

        Ok(model)
    }
}

fn check_feature_order(names: &[String]) -> Result<(), String> {
    let expected: Vec<&str> = Field::ALL.iter().map(Field::as_str).collect();
    if names.len() != expected.len() || names.iter().zip(&expected).any(|(a, b)| a != b) {
        return Err(format!(
            "feature_names [{}] do not match the expected order [{}]",
            names.join(", "),
            expected.join(", ")
        ));
    }
    Ok(())
}

fn build_scaler(spec: Option<ScalerSpec>) -> Result<Option<StandardScaler>, String> {
    spec.map(|s| StandardScaler::new(&s.mean, &s.scale)).transpose()
}

fn build_tree(spec: TreeSpec) -> Result<Tree, String> {
    let nodes = spec
        .nodes
        .into_iter()
        .map(|node| match node {
            NodeSpec::Leaf { leaf } => Node::Leaf(leaf),
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
                default_left,
            } => Node::Split {
                feature,
                threshold,
                left,
                right,
                default_left,
            },
        })
        .collect();
    Tree::new(nodes)
}
