//! Inference pipeline tests against mock and artifact-backed models

mod common;

use common::{sample_payload, FailingModel, MockModel, MockOutput};
use liver_risk_core::{Error, RiskLevel};
use liver_risk_model::{infer, infer_value, Capability, ModelHandle, RiskModel};
use serde_json::json;
use std::sync::Arc;

fn preloaded(model: MockModel) -> (Arc<MockModel>, ModelHandle) {
    let model = Arc::new(model);
    let shared: Arc<dyn RiskModel> = model.clone();
    (model, ModelHandle::preloaded(shared))
}

#[test]
fn test_probability_model_scenario() {
    let (_, handle) = preloaded(MockModel::probability(0.82));
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 82.0);
    assert_eq!(verdict.risk_level, RiskLevel::High);
}

#[test]
fn test_scalar_at_most_one_is_probability() {
    let (_, handle) = preloaded(MockModel::value(0.45));
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 45.0);
    assert_eq!(verdict.risk_level, RiskLevel::Medium);
}

#[test]
fn test_scalar_above_one_is_percentage() {
    let (_, handle) = preloaded(MockModel::value(12.34));
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 12.3);
    assert_eq!(verdict.risk_level, RiskLevel::Low);
}

#[test]
fn test_scalar_clamped() {
    let (_, handle) = preloaded(MockModel::value(340.0));
    assert_eq!(infer(&handle, &sample_payload()).unwrap().probability, 100.0);

    let (_, handle) = preloaded(MockModel::value(-3.0));
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 0.0);
    assert_eq!(verdict.risk_level, RiskLevel::Low);
}

#[test]
fn test_percentage_rounds_stored_value() {
    for (raw, expected) in [(12.25, 12.2), (1.15, 1.1), (82.05, 82.0), (12.35, 12.3)] {
        let (_, handle) = preloaded(MockModel::value(raw));
        let verdict = infer(&handle, &sample_payload()).unwrap();
        assert_eq!(verdict.probability, expected, "raw score {raw}");
    }
}

#[test]
fn test_negative_zero_serializes_as_zero() {
    let (_, handle) = preloaded(MockModel::value(-0.0));
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(
        serde_json::to_string(&verdict).unwrap(),
        r#"{"probability":0.0,"riskLevel":"low"}"#
    );
}

#[test]
fn test_label_falls_back_to_neutral() {
    let (_, handle) = preloaded(MockModel::label("Disease"));
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 50.0);
    assert_eq!(verdict.risk_level, RiskLevel::Medium);
}

#[test]
fn test_single_class_probabilities_rejected() {
    let (_, handle) = preloaded(MockModel::new(MockOutput::Probabilities(vec![0.7])));
    let err = infer(&handle, &sample_payload()).unwrap_err();
    assert!(matches!(err, Error::Inference(_)));
}

#[test]
fn test_empty_model_output_rejected() {
    let (_, handle) = preloaded(MockModel::probability(0.3).returning_nothing());
    let err = infer(&handle, &sample_payload()).unwrap_err();
    assert_eq!(err.to_string(), "inference error: model returned no probability rows");

    let (_, handle) = preloaded(MockModel::value(0.3).returning_nothing());
    let err = infer(&handle, &sample_payload()).unwrap_err();
    assert_eq!(err.to_string(), "inference error: model returned no predictions");
}

#[test]
fn test_model_failure_propagates() {
    for capability in [Capability::Probabilities, Capability::PointPrediction] {
        let handle = ModelHandle::preloaded(Arc::new(FailingModel::new(capability)));
        let err = infer(&handle, &sample_payload()).unwrap_err();
        assert!(err.to_string().starts_with("inference error: simulated"));
    }
}

#[test]
fn test_validation_error_skips_model() {
    let (model, handle) = preloaded(MockModel::probability(0.9));
    let mut payload = sample_payload();
    payload.insert("bmi".into(), json!("heavy"));

    let err = infer(&handle, &payload).unwrap_err();
    assert_eq!(err.to_string(), "Invalid numeric value supplied");
    assert_eq!(model.call_count(), 0);
}

#[test]
fn test_idempotent() {
    let (model, handle) = preloaded(MockModel::probability(0.377));
    let first = infer(&handle, &sample_payload()).unwrap();
    let second = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.probability, 37.7);
    assert_eq!(model.call_count(), 2);
}

#[test]
fn test_non_object_payload() {
    let (_, handle) = preloaded(MockModel::probability(0.5));
    let err = infer_value(&handle, &json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.to_string(), "Payload must be a JSON object");
}

#[test]
fn test_missing_model_reported_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let handle = ModelHandle::new(&path);

    let err = infer_value(&handle, &json!({})).unwrap_err();
    assert!(matches!(err, Error::ModelNotFound { .. }));
}

#[test]
fn test_artifact_backed_logistic_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    // Only liverFunctionTest contributes: sigmoid(0.05 * 40 - 2) = 0.5
    std::fs::write(
        &path,
        r#"{
            "format_version": 1,
            "name": "lft-only",
            "model": {
                "type": "logistic-regression",
                "coefficients": [0, 0, 0, 0, 0, 0, 0, 0, 0, 0.05],
                "intercept": -2.0
            }
        }"#,
    )
    .unwrap();

    let handle = ModelHandle::new(&path);
    let verdict = infer(&handle, &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 50.0);
    assert_eq!(verdict.risk_level, RiskLevel::Medium);
    assert!(handle.is_loaded());
}

#[test]
fn test_artifact_backed_label_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(
        &path,
        r#"{
            "format_version": 1,
            "model": {"type": "threshold-label", "feature": "alcohol", "threshold": 2,
                      "labels": ["healthy", "disease"]}
        }"#,
    )
    .unwrap();

    let verdict = infer(&ModelHandle::new(&path), &sample_payload()).unwrap();
    assert_eq!(verdict.probability, 50.0);
}
