use std::path::Path;
use std::sync::Mutex;

use shared::{FEATURE_COUNT, FeatureVector};
use tch::{CModule, Device, Kind, Tensor};

use super::{Classifier, InferenceError, LoadError, class_from_scores};

/// TorchScript classifier, placed on CUDA when available.
pub struct TorchClassifier {
    model: Mutex<CModule>,
    device: Device,
    name: String,
}

impl TorchClassifier {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let device = Device::cuda_if_available();
        let model = CModule::load_on_device(path, device).map_err(|e| LoadError::Runtime {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::info!("TorchScript model placed on {:?}", device);

        Ok(Self {
            model: Mutex::new(model),
            device,
            name: format!(
                "torchscript:{}",
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ),
        })
    }
}

impl Classifier for TorchClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        let input = Tensor::from_slice(features.as_slice())
            .view([1, FEATURE_COUNT as i64])
            .to_device(self.device);

        let output = {
            let model = self
                .model
                .lock()
                .map_err(|_| InferenceError::Worker("model lock poisoned".to_string()))?;
            model
                .forward_ts(&[input])
                .map_err(|e| InferenceError::Rejected(e.to_string()))?
        };
        let output = output.to_device(Device::Cpu);
        let unreadable = |e: tch::TchError| InferenceError::Output(e.to_string());

        match output.kind() {
            Kind::Int64 | Kind::Int | Kind::Int16 | Kind::Int8 | Kind::Uint8 => {
                let labels = Vec::<i64>::try_from(output.to_kind(Kind::Int64).view([-1]))
                    .map_err(unreadable)?;
                labels
                    .first()
                    .copied()
                    .ok_or_else(|| InferenceError::Output("empty label tensor".to_string()))
            }
            _ => {
                let size = output.size();
                let row_len = size.get(1).copied().unwrap_or(1).max(1) as usize;
                let scores = Vec::<f32>::try_from(output.to_kind(Kind::Float).view([-1]))
                    .map_err(unreadable)?;
                class_from_scores(&scores[..row_len.min(scores.len())])
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
