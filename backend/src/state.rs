use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use shared::{FEATURE_NAMES, FeatureVector, PredictionRequest, SERVICE_TITLE, SERVICE_VERSION};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::model::{Classifier, LoadError, load_classifier};

pub enum ModelSlot {
    Ready(Arc<dyn Classifier>),
    /// Load failed at startup; the reason is replayed on every prediction.
    Unavailable(String),
}

/// Everything the handlers share for the lifetime of the process.
pub struct AppState {
    model: ModelSlot,
    favicon_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub title: &'static str,
    pub version: &'static str,
    pub classifier: Option<String>,
    pub loaded: bool,
    pub load_error: Option<String>,
    pub features: &'static [&'static str],
    /// Row sent to the model for the demo client's default inputs.
    pub default_row: Vec<FeatureColumn>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FeatureColumn {
    pub name: &'static str,
    pub value: f32,
}

impl AppState {
    pub fn new(model: ModelSlot, favicon_path: impl Into<PathBuf>) -> Self {
        Self {
            model,
            favicon_path: favicon_path.into(),
        }
    }

    /// Loads the model named by `config`. A failed load is kept as an
    /// unavailable slot unless the config requires a model.
    pub fn initialize(config: &ServerConfig) -> Result<Self, LoadError> {
        let model = match load_classifier(&config.model_path) {
            Ok(classifier) => {
                log::info!(
                    "Model loaded from {} ({})",
                    config.model_path.display(),
                    classifier.name()
                );
                ModelSlot::Ready(classifier)
            }
            Err(e) if config.require_model => return Err(e),
            Err(e) => {
                log::error!("Failed to load model at startup: {}", e);
                log::warn!("Serving without a model; /predict will answer 500");
                ModelSlot::Unavailable(e.to_string())
            }
        };

        Ok(Self::new(model, config.favicon_path.clone()))
    }

    pub fn classifier(&self) -> Result<Arc<dyn Classifier>, ApiError> {
        match &self.model {
            ModelSlot::Ready(classifier) => Ok(Arc::clone(classifier)),
            ModelSlot::Unavailable(reason) => Err(ApiError::ModelUnavailable(reason.clone())),
        }
    }

    pub fn favicon_path(&self) -> &Path {
        &self.favicon_path
    }

    pub fn model_info(&self) -> ModelInfo {
        let (classifier, load_error) = match &self.model {
            ModelSlot::Ready(classifier) => (Some(classifier.name().to_string()), None),
            ModelSlot::Unavailable(reason) => (None, Some(reason.clone())),
        };

        ModelInfo {
            title: SERVICE_TITLE,
            version: SERVICE_VERSION,
            loaded: classifier.is_some(),
            classifier,
            load_error,
            features: &FEATURE_NAMES,
            default_row: FeatureVector::from_request(&PredictionRequest::default())
                .named()
                .map(|(name, value)| FeatureColumn { name, value })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::FixedClassifier;

    fn config_with_model(path: PathBuf, require_model: bool) -> ServerConfig {
        ServerConfig {
            model_path: path,
            require_model,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn missing_model_keeps_serving_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_model(dir.path().join("missing.onnx"), false);

        let state = AppState::initialize(&config).unwrap();
        let err = state.classifier().err().unwrap();
        assert!(err.to_string().starts_with("Model loading error:"));
        assert!(err.to_string().contains("missing.onnx"));

        let info = state.model_info();
        assert!(!info.loaded);
        assert!(info.load_error.is_some());
    }

    #[test]
    fn missing_model_is_fatal_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_model(dir.path().join("missing.onnx"), true);

        assert!(matches!(
            AppState::initialize(&config),
            Err(LoadError::Missing(_))
        ));
    }

    #[test]
    fn ready_state_exposes_the_classifier() {
        let state = AppState::new(
            ModelSlot::Ready(Arc::new(FixedClassifier(0))),
            "static/favicon.png",
        );
        assert_eq!(state.classifier().unwrap().name(), "fixed");

        let info = state.model_info();
        assert!(info.loaded);
        assert_eq!(info.classifier.as_deref(), Some("fixed"));
        assert_eq!(info.features.len(), 28);
        assert_eq!(info.default_row.len(), 28);
        assert_eq!(
            info.default_row[1],
            FeatureColumn {
                name: "age",
                value: 35.0
            }
        );
        assert!(info.default_row[3..].iter().all(|column| column.value == 0.0));
    }
}
