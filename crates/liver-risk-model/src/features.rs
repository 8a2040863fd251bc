//! Payload validation and feature preparation

use liver_risk_core::{Error, FeatureMatrix, FeatureVector, Field, Result, FEATURE_COUNT};
use serde_json::{Map, Value};

/// Message for any value that cannot be read as a number
pub const INVALID_NUMERIC: &str = "Invalid numeric value supplied";

/// Validate `payload` and encode it as a single-row feature matrix.
///
/// All missing fields are reported together, in canonical order, before any
/// value is coerced.
pub fn prepare_features(payload: &Map<String, Value>) -> Result<FeatureMatrix> {
    let missing: Vec<&str> = Field::ALL
        .iter()
        .filter(|field| !payload.contains_key(field.as_str()))
        .map(Field::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(Error::validation(format!(
            "Missing fields: {}",
            missing.join(", ")
        )));
    }

    let mut values = [0.0; FEATURE_COUNT];
    for field in Field::ALL {
        let value = &payload[field.as_str()];
        values[field.index()] = coerce(value).ok_or_else(|| {
            tracing::debug!(field = %field, value = %value, "rejecting non-numeric value");
            Error::validation(INVALID_NUMERIC)
        })?;
    }

    Ok(FeatureMatrix::single(FeatureVector::new(values)))
}

/// Read a JSON value as `f64`.
///
/// Numbers pass through, booleans become 1/0, strings are trimmed and parsed.
/// Everything else is rejected.
pub fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
