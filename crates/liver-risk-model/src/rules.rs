//! Rule-based and constant models

use crate::model::{Capability, ClassProbabilities, Prediction, RiskModel};
use liver_risk_core::{FeatureMatrix, Field, Result};

/// Single-feature rule that emits a class label
#[derive(Debug, Clone)]
pub struct ThresholdLabel {
    name: String,
    field: Field,
    threshold: f64,
    below: String,
    at_or_above: String,
}

impl ThresholdLabel {
    pub fn new(
        name: impl Into<String>,
        field: Field,
        threshold: f64,
        below: impl Into<String>,
        at_or_above: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field,
            threshold,
            below: below.into(),
            at_or_above: at_or_above.into(),
        }
    }
}

impl RiskModel for ThresholdLabel {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::PointPrediction
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        Ok(features
            .rows()
            .map(|row| {
                let label = if row.get(self.field) < self.threshold {
                    &self.below
                } else {
                    &self.at_or_above
                };
                Prediction::Label(label.clone())
            })
            .collect())
    }
}

/// Fixed output for every row
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantOutput {
    Probability(f64),
    Value(f64),
    Label(String),
}

/// Model that ignores its input, used for smoke tests and calibration stubs
#[derive(Debug, Clone)]
pub struct ConstantModel {
    name: String,
    output: ConstantOutput,
}

impl ConstantModel {
    pub fn new(name: impl Into<String>, output: ConstantOutput) -> Self {
        Self {
            name: name.into(),
            output,
        }
    }
}

impl RiskModel for ConstantModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        match self.output {
            ConstantOutput::Probability(_) => Capability::Probabilities,
            ConstantOutput::Value(_) | ConstantOutput::Label(_) => Capability::PointPrediction,
        }
    }

    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<ClassProbabilities>> {
        match self.output {
            ConstantOutput::Probability(p) => Ok(features
                .rows()
                .map(|_| ClassProbabilities::binary(p))
                .collect()),
            _ => Err(liver_risk_core::Error::inference(format!(
                "model '{}' does not produce class probabilities",
                self.name
            ))),
        }
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        let prediction = match &self.output {
            ConstantOutput::Probability(p) => Prediction::Numeric(if *p >= 0.5 { 1.0 } else { 0.0 }),
            ConstantOutput::Value(v) => Prediction::Numeric(*v),
            ConstantOutput::Label(label) => Prediction::Label(label.clone()),
        };
        Ok(features.rows().map(|_| prediction.clone()).collect())
    }
}
