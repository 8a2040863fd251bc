//! Liver Risk Core
//!
//! Core types and utilities shared across the liver risk adapter crates.
//!
//! This crate provides:
//! - The canonical clinical input fields and their fixed model order
//! - Feature vectors and the batch-shaped matrix handed to models
//! - Risk buckets, verdicts and the stdout envelope
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Envelope, FeatureMatrix, FeatureVector, Field, RiskLevel, Verdict, FEATURE_COUNT};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Envelope, FeatureMatrix, FeatureVector, Field, RiskLevel, Verdict};
}
