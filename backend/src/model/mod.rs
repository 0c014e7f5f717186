mod onnx;
#[cfg(feature = "torch")]
mod torch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::{FeatureVector, PredictionRequest, Verdict};

pub use onnx::OnnxClassifier;
#[cfg(feature = "torch")]
pub use torch::TorchClassifier;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to load {}: {}", .path.display(), .reason)]
    Runtime { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model rejected the input: {0}")]
    Rejected(String),
    #[error("unreadable model output: {0}")]
    Output(String),
    #[error("inference worker failed: {0}")]
    Worker(String),
}

/// Anything that can turn one feature row into a class label.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError>;

    fn name(&self) -> &str;
}

pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "onnx" => Ok(Arc::new(OnnxClassifier::load(path)?)),
        #[cfg(feature = "torch")]
        "pt" | "ts" | "torchscript" => Ok(Arc::new(TorchClassifier::load(path)?)),
        #[cfg(not(feature = "torch"))]
        "pt" | "ts" | "torchscript" => Err(LoadError::UnsupportedFormat(format!(
            ".{} (built without the `torch` feature)",
            extension
        ))),
        "" => Err(LoadError::UnsupportedFormat(format!(
            "{} has no file extension",
            path.display()
        ))),
        other => Err(LoadError::UnsupportedFormat(format!(".{}", other))),
    }
}

pub fn predict(
    classifier: &dyn Classifier,
    request: &PredictionRequest,
) -> Result<Verdict, InferenceError> {
    let features = FeatureVector::from_request(request);
    let class = classifier.predict(&features)?;
    Ok(Verdict::from_class(class))
}

/// Reads a class out of one row of scores: a single column is a positive-class
/// probability, several columns are per-class scores.
pub(crate) fn class_from_scores(scores: &[f32]) -> Result<i64, InferenceError> {
    match scores {
        [] => Err(InferenceError::Output("empty score row".to_string())),
        [score] => Ok(if *score >= 0.5 { 1 } else { 0 }),
        _ => Ok(scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i as i64)
            .unwrap_or(0)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    pub struct FixedClassifier(pub i64);

    impl Classifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> Result<i64, InferenceError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    pub struct RejectingClassifier;

    impl Classifier for RejectingClassifier {
        fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
            Err(InferenceError::Rejected(format!(
                "expected 30 features, got {}",
                features.len()
            )))
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[derive(Default)]
    pub struct RecordingClassifier {
        pub seen: Mutex<Vec<FeatureVector>>,
    }

    impl Classifier for RecordingClassifier {
        fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
            self.seen.lock().unwrap().push(features.clone());
            Ok(0)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }
}
