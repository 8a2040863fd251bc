//! Stdin-to-stdout adapter
//!
//! Exactly one JSON object is written per run; diagnostics go through
//! tracing to stderr.

use liver_risk_core::{Envelope, Error, Result, Verdict};
use liver_risk_model::{infer_value, ModelHandle};
use serde_json::{Map, Value};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Result of one adapter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Failure => ExitCode::from(1),
        }
    }
}

/// Read a payload from `input`, run inference, write the envelope to `output`.
///
/// Pipeline errors become a failure envelope; only a failure to write the
/// envelope itself is returned as `Err`.
pub fn run<R: Read, W: Write>(mut input: R, output: W, handle: &ModelHandle) -> io::Result<Outcome> {
    match process(&mut input, handle) {
        Ok(verdict) => {
            info!(
                probability = verdict.probability,
                risk_level = %verdict.risk_level,
                "Prediction complete"
            );
            emit(output, &Envelope::success(verdict))?;
            Ok(Outcome::Success)
        }
        Err(err) => report(output, &err),
    }
}

/// Write a failure envelope for an error raised outside [`run`]
pub fn report<W: Write>(output: W, err: &Error) -> io::Result<Outcome> {
    error!(kind = err.kind(), error = %err, "Prediction failed");
    emit(output, &Envelope::failure(err.to_string()))?;
    Ok(Outcome::Failure)
}

fn process<R: Read>(input: &mut R, handle: &ModelHandle) -> Result<Verdict> {
    let mut raw = String::new();
    input.read_to_string(&mut raw)?;
    debug!(bytes = raw.len(), "Read payload");

    let payload = parse_payload(&raw)?;
    infer_value(handle, &payload)
}

/// Parse stdin text; zero-length input is an empty object
pub fn parse_payload(raw: &str) -> Result<Value> {
    if raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(raw)?)
}

fn emit<W: Write>(mut output: W, envelope: &Envelope) -> io::Result<()> {
    serde_json::to_writer(&mut output, envelope)?;
    output.write_all(b"\n")?;
    output.flush()
}
