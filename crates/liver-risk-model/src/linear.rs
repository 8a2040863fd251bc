//! Linear models: logistic and ordinary regression with optional standardization

use crate::model::{Capability, ClassProbabilities, Prediction, RiskModel};
use liver_risk_core::{FeatureMatrix, FeatureVector, Result, FEATURE_COUNT};

/// Per-feature standardization `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Build a scaler, rejecting zero or non-finite scales
    pub fn new(mean: &[f64], scale: &[f64]) -> std::result::Result<Self, String> {
        let mean = to_array("scaler.mean", mean)?;
        let scale = to_array("scaler.scale", scale)?;
        if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(format!("scaler.scale[{i}] must be finite and non-zero"));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("scaler.mean[{i}] must be finite"));
        }
        Ok(Self { mean, scale })
    }

    pub fn transform(&self, row: &FeatureVector) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, x) in row.as_slice().iter().enumerate() {
            out[i] = (x - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Weights shared by both linear models
#[derive(Debug, Clone, PartialEq)]
struct LinearWeights {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    scaler: Option<StandardScaler>,
}

impl LinearWeights {
    fn new(
        coefficients: &[f64],
        intercept: f64,
        scaler: Option<StandardScaler>,
    ) -> std::result::Result<Self, String> {
        Ok(Self {
            coefficients: to_array("coefficients", coefficients)?,
            intercept,
            scaler,
        })
    }

    fn decision(&self, row: &FeatureVector) -> f64 {
        let scaled;
        let x: &[f64] = match &self.scaler {
            Some(scaler) => {
                scaled = scaler.transform(row);
                &scaled
            }
            None => row.as_slice(),
        };
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

/// Binary logistic regression producing class probabilities
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    name: String,
    weights: LinearWeights,
}

impl LogisticRegression {
    /// Create a logistic regression from 10 coefficients
    pub fn new(
        name: impl Into<String>,
        coefficients: &[f64],
        intercept: f64,
        scaler: Option<StandardScaler>,
    ) -> std::result::Result<Self, String> {
        Ok(Self {
            name: name.into(),
            weights: LinearWeights::new(coefficients, intercept, scaler)?,
        })
    }

    fn positive_probability(&self, row: &FeatureVector) -> f64 {
        sigmoid(self.weights.decision(row))
    }
}

impl RiskModel for LogisticRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::Probabilities
    }

    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<ClassProbabilities>> {
        Ok(features
            .rows()
            .map(|row| ClassProbabilities::binary(self.positive_probability(row)))
            .collect())
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        Ok(features
            .rows()
            .map(|row| {
                let class = if self.positive_probability(row) >= 0.5 { 1.0 } else { 0.0 };
                Prediction::Numeric(class)
            })
            .collect())
    }
}

/// Ordinary linear regression producing a raw numeric prediction
#[derive(Debug, Clone)]
pub struct LinearRegression {
    name: String,
    weights: LinearWeights,
}

impl LinearRegression {
    /// Create a linear regression from 10 coefficients
    pub fn new(
        name: impl Into<String>,
        coefficients: &[f64],
        intercept: f64,
        scaler: Option<StandardScaler>,
    ) -> std::result::Result<Self, String> {
        Ok(Self {
            name: name.into(),
            weights: LinearWeights::new(coefficients, intercept, scaler)?,
        })
    }
}

impl RiskModel for LinearRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::PointPrediction
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        Ok(features
            .rows()
            .map(|row| Prediction::Numeric(self.weights.decision(row)))
            .collect())
    }
}

/// Logistic function
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn to_array(what: &str, values: &[f64]) -> std::result::Result<[f64; FEATURE_COUNT], String> {
    values.try_into().map_err(|_| {
        format!(
            "{what} must have {FEATURE_COUNT} entries, got {}",
            values.len()
        )
    })
}
