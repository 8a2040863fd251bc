//! Inference: payload to verdict

use crate::features::prepare_features;
use crate::loader::ModelHandle;
use crate::model::RawScore;
use liver_risk_core::{Error, Result, RiskLevel, Verdict};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Run the full pipeline for one payload.
///
/// Model loading happens before validation, so a missing artifact is
/// reported even for an invalid payload.
pub fn infer(handle: &ModelHandle, payload: &Map<String, Value>) -> Result<Verdict> {
    let model = handle.get()?;
    let features = prepare_features(payload)?;

    let raw = RawScore::from_model(model, &features)?;
    debug!(model = model.name(), raw = ?raw, "Model scored payload");
    if let RawScore::Label(label) = &raw {
        warn!(
            label = %label,
            fallback = RawScore::LABEL_FALLBACK,
            "Model returned a label, using neutral probability"
        );
    }

    normalize(raw.to_percentage())
}

/// Same as [`infer`] for an arbitrary JSON value, which must be an object
pub fn infer_value(handle: &ModelHandle, payload: &Value) -> Result<Verdict> {
    match payload {
        Value::Object(map) => infer(handle, map),
        _ => {
            // Keep the missing-model report ahead of payload checks
            handle.get()?;
            Err(Error::validation("Payload must be a JSON object"))
        }
    }
}

/// Clamp a percentage to `[0, 100]`, bucketize it, then round to one decimal.
///
/// A NaN score is rejected instead of being clamped. A plain min/max clamp
/// would turn it into 100.0 and a `high` verdict.
pub fn normalize(percentage: f64) -> Result<Verdict> {
    if percentage.is_nan() {
        return Err(Error::inference("model produced a non-finite score"));
    }
    // Adding zero turns -0.0 into 0.0
    let clamped = percentage.clamp(0.0, 100.0) + 0.0;
    Ok(Verdict {
        probability: round_one_decimal(clamped),
        risk_level: RiskLevel::from_probability(clamped),
    })
}

/// Round the exact stored value to one decimal place, ties to even.
///
/// Scaling by ten first would round twice, so 82.05 (stored just below)
/// would come out as 82.1. Exact ties only exist for quarter values, and
/// for those the scaled product is exact.
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 10.0;
    if (value * 4.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        let floor = scaled.floor();
        let even = if floor % 2.0 == 0.0 { floor } else { floor + 1.0 };
        return even / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(-12.0).unwrap().probability, 0.0);
        assert_eq!(normalize(250.0).unwrap().probability, 100.0);
        assert_eq!(normalize(f64::INFINITY).unwrap().probability, 100.0);
        assert_eq!(normalize(f64::NEG_INFINITY).unwrap().risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_normalize_rejects_nan() {
        let err = normalize(f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "inference error: model produced a non-finite score");
    }

    #[test]
    fn test_bucket_uses_unrounded_value() {
        // 29.96 rounds to 30.0 but is still below the medium threshold
        let verdict = normalize(29.96).unwrap();
        assert_eq!(verdict.probability, 30.0);
        assert_eq!(verdict.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(82.0), 82.0);
        assert_eq!(round_one_decimal(12.34), 12.3);
        assert_eq!(round_one_decimal(12.36), 12.4);
        assert_eq!(round_one_decimal(0.25), 0.2);
        assert_eq!(round_one_decimal(0.75), 0.8);
    }

    #[test]
    fn test_round_one_decimal_uses_stored_value() {
        // 1.15 and 82.05 are stored just below the written value
        assert_eq!(round_one_decimal(1.15), 1.1);
        assert_eq!(round_one_decimal(82.05), 82.0);
        assert_eq!(round_one_decimal(12.25), 12.2);
        assert_eq!(round_one_decimal(12.35), 12.3);
        assert_eq!(round_one_decimal(99.95), 100.0);
    }

    #[test]
    fn test_normalize_negative_zero() {
        let verdict = normalize(-0.0).unwrap();
        assert!(verdict.probability.is_sign_positive());
        assert_eq!(verdict.risk_level, RiskLevel::Low);
    }
}
