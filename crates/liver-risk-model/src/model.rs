//! Risk model trait and common types

use liver_risk_core::{Error, FeatureMatrix, Result};

/// Trait for all risk models.
///
/// Models expose one of two capabilities. Probability models answer
/// [`RiskModel::predict_proba`]; point-prediction models only answer
/// [`RiskModel::predict`]. Callers query [`RiskModel::capability`] instead
/// of probing the model.
pub trait RiskModel: Send + Sync + std::fmt::Debug {
    /// Get the model name
    fn name(&self) -> &str;

    /// Which prediction interface this model supports
    fn capability(&self) -> Capability;

    /// Per-class probabilities for every row, index 1 is the positive class
    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<ClassProbabilities>> {
        let _ = features;
        Err(Error::inference(format!(
            "model '{}' does not produce class probabilities",
            self.name()
        )))
    }

    /// A single predicted value per row
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>>;
}

/// Prediction interface exposed by a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Class probabilities via `predict_proba`
    Probabilities,
    /// One value or label per row via `predict`
    PointPrediction,
}

/// Probability distribution over classes for one row
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities(Vec<f64>);

impl ClassProbabilities {
    pub fn new(classes: Vec<f64>) -> Self {
        Self(classes)
    }

    /// Two-class distribution from the positive-class probability
    pub fn binary(positive: f64) -> Self {
        Self(vec![1.0 - positive, positive])
    }

    /// Probability of the positive class (index 1)
    pub fn positive(&self) -> Option<f64> {
        self.0.get(1).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Point prediction for one row
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Numeric output (regression value or numeric class)
    Numeric(f64),
    /// Non-numeric class label
    Label(String),
}

/// Raw model output for the single inference row, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawScore {
    /// Positive-class probability in `[0, 1]`
    Probability(f64),
    /// Numeric point prediction of unknown scale
    Scalar(f64),
    /// Opaque class label
    Label(String),
}

impl RawScore {
    /// Neutral percentage used when the model only yields a label
    pub const LABEL_FALLBACK: f64 = 50.0;

    /// Score the first row of `features` using whichever interface `model` exposes
    pub fn from_model(model: &dyn RiskModel, features: &FeatureMatrix) -> Result<Self> {
        match model.capability() {
            Capability::Probabilities => {
                let rows = model.predict_proba(features)?;
                let first = rows
                    .first()
                    .ok_or_else(|| Error::inference("model returned no probability rows"))?;
                let positive = first.positive().ok_or_else(|| {
                    Error::inference(format!(
                        "expected at least 2 class probabilities, got {}",
                        first.as_slice().len()
                    ))
                })?;
                Ok(Self::Probability(positive))
            }
            Capability::PointPrediction => {
                let rows = model.predict(features)?;
                match rows.into_iter().next() {
                    Some(Prediction::Numeric(value)) => Ok(Self::Scalar(value)),
                    Some(Prediction::Label(label)) => Ok(Self::Label(label)),
                    None => Err(Error::inference("model returned no predictions")),
                }
            }
        }
    }

    /// Convert to a percentage-like value, not yet clamped.
    ///
    /// Scalars at or below 1 are read as probabilities; larger scalars are
    /// assumed to already be percentages. Labels map to [`Self::LABEL_FALLBACK`].
    pub fn to_percentage(&self) -> f64 {
        match self {
            Self::Probability(p) => p * 100.0,
            Self::Scalar(v) if *v <= 1.0 => v * 100.0,
            Self::Scalar(v) => *v,
            Self::Label(_) => Self::LABEL_FALLBACK,
        }
    }
}
