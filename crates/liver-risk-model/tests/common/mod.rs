//! Mock models for testing
//!
//! Provides configurable implementations of the RiskModel trait for
//! exercising capability branching, normalization and error paths.

#![allow(dead_code)]

use liver_risk_core::{Error, FeatureMatrix, Result};
use liver_risk_model::{Capability, ClassProbabilities, Prediction, RiskModel};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicU32, Ordering};

/// What a [`MockModel`] returns for every row
#[derive(Debug, Clone)]
pub enum MockOutput {
    Probabilities(Vec<f64>),
    Value(f64),
    Label(String),
}

/// A configurable mock model
#[derive(Debug)]
pub struct MockModel {
    name: String,
    output: MockOutput,
    empty: bool,
    call_count: AtomicU32,
}

impl MockModel {
    /// Probability model returning `[1 - p, p]`
    pub fn probability(p: f64) -> Self {
        Self::new(MockOutput::Probabilities(vec![1.0 - p, p]))
    }

    /// Point-prediction model returning a number
    pub fn value(v: f64) -> Self {
        Self::new(MockOutput::Value(v))
    }

    /// Point-prediction model returning a label
    pub fn label(label: &str) -> Self {
        Self::new(MockOutput::Label(label.to_string()))
    }

    pub fn new(output: MockOutput) -> Self {
        Self {
            name: "mock".to_string(),
            output,
            empty: false,
            call_count: AtomicU32::new(0),
        }
    }

    /// Return zero rows regardless of input
    pub fn returning_nothing(mut self) -> Self {
        self.empty = true;
        self
    }

    /// Number of predict/predict_proba calls
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn rows<T: Clone>(&self, features: &FeatureMatrix, item: T) -> Vec<T> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.empty {
            return Vec::new();
        }
        features.rows().map(|_| item.clone()).collect()
    }
}

impl RiskModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        match self.output {
            MockOutput::Probabilities(_) => Capability::Probabilities,
            MockOutput::Value(_) | MockOutput::Label(_) => Capability::PointPrediction,
        }
    }

    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<ClassProbabilities>> {
        match &self.output {
            MockOutput::Probabilities(p) => {
                Ok(self.rows(features, ClassProbabilities::new(p.clone())))
            }
            _ => Err(Error::inference("mock has no probabilities")),
        }
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        let prediction = match &self.output {
            MockOutput::Probabilities(p) => {
                let positive = p.get(1).copied().unwrap_or(0.0);
                Prediction::Numeric(if positive >= 0.5 { 1.0 } else { 0.0 })
            }
            MockOutput::Value(v) => Prediction::Numeric(*v),
            MockOutput::Label(l) => Prediction::Label(l.clone()),
        };
        Ok(self.rows(features, prediction))
    }
}

/// A model that always fails - for testing error paths
#[derive(Debug)]
pub struct FailingModel {
    capability: Capability,
}

impl FailingModel {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }
}

impl RiskModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    fn predict_proba(&self, _features: &FeatureMatrix) -> Result<Vec<ClassProbabilities>> {
        Err(Error::inference("simulated predict_proba failure"))
    }

    fn predict(&self, _features: &FeatureMatrix) -> Result<Vec<Prediction>> {
        Err(Error::inference("simulated predict failure"))
    }
}

/// The reference patient used across tests
pub fn sample_payload() -> Map<String, Value> {
    match json!({
        "age": 45,
        "gender": 1,
        "bmi": 27.5,
        "alcohol": 0,
        "smoking": 1,
        "geneticRisk": 0,
        "physicalActivity": 1,
        "diabetes": 0,
        "hypertension": 0,
        "liverFunctionTest": 40
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
