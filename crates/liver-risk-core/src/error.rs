//! Error types for the liver risk adapter
//!
//! The `Display` output of every variant is the exact string written into
//! the failure envelope, so messages here are part of the stdout contract.

use std::path::PathBuf;

/// Result type alias using the adapter's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for adapter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model artifact does not exist at the resolved path
    #[error("Model file not found at {}", path.display())]
    ModelNotFound { path: PathBuf },

    /// Payload is missing fields or carries non-numeric values
    #[error("{0}")]
    Validation(String),

    /// The model artifact exists but cannot be turned into a model
    #[error("invalid model artifact {}: {reason}", path.display())]
    InvalidModel { path: PathBuf, reason: String },

    /// The model rejected the input or produced unusable output
    #[error("inference error: {0}")]
    Inference(String),

    /// Malformed JSON on standard input
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new invalid-artifact error
    pub fn invalid_model(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short machine-friendly name of the error category, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => "model_not_found",
            Self::Validation(_) => "validation",
            Self::InvalidModel { .. } | Self::Inference(_) | Self::Io(_) => "inference",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
        }
    }
}
