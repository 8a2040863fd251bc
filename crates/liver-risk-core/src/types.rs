//! Core types for the liver risk adapter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of clinical features the model consumes
pub const FEATURE_COUNT: usize = 10;

/// A clinical input field.
///
/// Declaration order is the column order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Gender,
    Bmi,
    Alcohol,
    Smoking,
    GeneticRisk,
    PhysicalActivity,
    Diabetes,
    Hypertension,
    LiverFunctionTest,
}

impl Field {
    /// All fields in canonical model order
    pub const ALL: [Field; FEATURE_COUNT] = [
        Field::Age,
        Field::Gender,
        Field::Bmi,
        Field::Alcohol,
        Field::Smoking,
        Field::GeneticRisk,
        Field::PhysicalActivity,
        Field::Diabetes,
        Field::Hypertension,
        Field::LiverFunctionTest,
    ];

    /// Payload key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Bmi => "bmi",
            Self::Alcohol => "alcohol",
            Self::Smoking => "smoking",
            Self::GeneticRisk => "geneticRisk",
            Self::PhysicalActivity => "physicalActivity",
            Self::Diabetes => "diabetes",
            Self::Hypertension => "hypertension",
            Self::LiverFunctionTest => "liverFunctionTest",
        }
    }

    /// Look up a field by its payload key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Column index of this field in a feature vector
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of model input, in canonical field order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap raw values already in canonical order
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Value of a single field
    pub fn get(&self, field: Field) -> f64 {
        self.0[field.index()]
    }

    /// Raw values in canonical order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::new(values)
    }
}

/// Batch-shaped model input: N rows of 10 columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    rows: Vec<FeatureVector>,
}

impl FeatureMatrix {
    /// Create a matrix holding a single row
    pub fn single(row: FeatureVector) -> Self {
        Self { rows: vec![row] }
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (always [`FEATURE_COUNT`])
    pub fn n_cols(&self) -> usize {
        FEATURE_COUNT
    }

    /// Row at `index`, if present
    pub fn row(&self, index: usize) -> Option<&FeatureVector> {
        self.rows.get(index)
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &FeatureVector> {
        self.rows.iter()
    }
}

/// Coarse risk bucket derived from a percentage probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lower bound (inclusive) of the medium bucket
    pub const MEDIUM_THRESHOLD: f64 = 30.0;

    /// Lower bound (inclusive) of the high bucket
    pub const HIGH_THRESHOLD: f64 = 60.0;

    /// Bucketize a percentage in `[0, 100]`
    pub fn from_probability(probability: f64) -> Self {
        if probability < Self::MEDIUM_THRESHOLD {
            Self::Low
        } else if probability < Self::HIGH_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful inference result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Percentage in `[0, 100]`, rounded to one decimal
    pub probability: f64,

    /// Bucket of the clamped, unrounded probability
    pub risk_level: RiskLevel,
}

/// The single JSON object written to stdout per invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,

    #[serde(flatten)]
    pub verdict: Option<Verdict>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Success envelope carrying a verdict
    pub fn success(verdict: Verdict) -> Self {
        Self {
            success: true,
            verdict: Some(verdict),
            error: None,
        }
    }

    /// Failure envelope carrying a human-readable message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            verdict: None,
            error: Some(error.into()),
        }
    }
}
