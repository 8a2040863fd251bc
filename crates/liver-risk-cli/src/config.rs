//! Adapter configuration

use crate::cli::Cli;
use liver_risk_core::{Error, Result};
use liver_risk_model::default_model_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Adapter configuration, from an optional YAML file plus CLI/env overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Model artifact path; relative paths resolve against the config file
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// tracing-subscriber filter directive used when RUST_LOG is unset
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl AdapterConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(model) = &cli.model {
            config.model_path = Some(model.clone());
        }

        Ok(config)
    }

    /// Read a YAML config file; an explicitly named file must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;

        if let (Some(model), Some(dir)) = (&config.model_path, path.parent()) {
            if model.is_relative() {
                config.model_path = Some(dir.join(model));
            }
        }
        Ok(config)
    }

    /// Resolved artifact path
    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| default_model_path(&install_root()))
    }
}

/// Workspace root, two levels above this crate's manifest directory
pub fn install_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
