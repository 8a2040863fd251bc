//! Model loading and process-lifetime caching

use crate::artifact::ModelArtifact;
use crate::model::RiskModel;
use liver_risk_core::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// File name of the model artifact under the install root
pub const MODEL_FILE_NAME: &str = "liver_disease_model.json";

/// Read and build a model artifact from disk
pub fn load_model(path: &Path) -> Result<Arc<dyn RiskModel>> {
    if !path.exists() {
        return Err(Error::ModelNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    let artifact =
        ModelArtifact::from_json(&text).map_err(|e| Error::invalid_model(path, e.to_string()))?;
    let model = artifact
        .build()
        .map_err(|reason| Error::invalid_model(path, reason))?;

    info!(
        path = %path.display(),
        model = model.name(),
        capability = ?model.capability(),
        "Loaded model artifact"
    );
    Ok(Arc::from(model))
}

/// Lazily loaded model, read from disk at most once.
///
/// Passed by reference into inference so tests can hand in a stub model
/// without touching global state.
#[derive(Debug)]
pub struct ModelHandle {
    path: Option<PathBuf>,
    model: OnceLock<Arc<dyn RiskModel>>,
}

impl ModelHandle {
    /// Handle that will load the artifact at `path` on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            model: OnceLock::new(),
        }
    }

    /// Handle wrapping an already-built model
    pub fn preloaded(model: Arc<dyn RiskModel>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(model);
        Self { path: None, model: cell }
    }

    /// Artifact path, if this handle loads from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the model is already in memory
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Get the model, loading it on first call.
    ///
    /// A failed load leaves the handle empty, so the next call retries.
    pub fn get(&self) -> Result<&dyn RiskModel> {
        if let Some(model) = self.model.get() {
            debug!(model = model.name(), "Using cached model");
            return Ok(model.as_ref());
        }

        let path = self
            .path
            .as_deref()
            .ok_or_else(|| Error::config("model handle has neither a model nor a path"))?;
        let loaded = load_model(path)?;
        Ok(self.model.get_or_init(|| loaded).as_ref())
    }
}

/// Default artifact location: `<install_root>/liver_disease_model.json`
pub fn default_model_path(install_root: &Path) -> PathBuf {
    install_root.join(MODEL_FILE_NAME)
}
