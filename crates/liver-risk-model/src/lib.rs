//! Liver Risk Model
//!
//! Model boundary and inference pipeline for the liver disease risk adapter.
//!
//! A trained estimator is loaded from a JSON artifact into a [`RiskModel`],
//! cached in a [`ModelHandle`], and driven by [`infer`]:
//! validate → featurize → predict → normalize.

pub mod artifact;
pub mod features;
pub mod inference;
pub mod linear;
pub mod loader;
pub mod model;
pub mod rules;
pub mod trees;

pub use artifact::{ModelArtifact, ModelSpec, FORMAT_VERSION};
pub use features::{coerce, prepare_features, INVALID_NUMERIC};
pub use inference::{infer, infer_value, normalize, round_one_decimal};
pub use loader::{default_model_path, load_model, ModelHandle, MODEL_FILE_NAME};
pub use model::{Capability, ClassProbabilities, Prediction, RawScore, RiskModel};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::inference::{infer, infer_value};
    pub use crate::linear::{LinearRegression, LogisticRegression, StandardScaler};
    pub use crate::loader::ModelHandle;
    pub use crate::model::{Capability, ClassProbabilities, Prediction, RawScore, RiskModel};
    pub use crate::rules::{ConstantModel, ConstantOutput, ThresholdLabel};
    pub use crate::trees::{Node, Objective, Tree, TreeEnsemble};
}
