use std::path::Path;

use shared::{FEATURE_COUNT, FeatureVector};
use tract_onnx::prelude::*;

use super::{Classifier, InferenceError, LoadError, class_from_scores};

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX classifier (scikit-learn exports included, as long as they were
/// converted without a ZipMap output).
pub struct OnnxClassifier {
    plan: OnnxPlan,
    name: String,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let runtime = |e: TractError| LoadError::Runtime {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(runtime)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1i64, FEATURE_COUNT as i64)),
            )
            .map_err(runtime)?
            .into_optimized()
            .map_err(runtime)?
            .into_runnable()
            .map_err(runtime)?;

        let name = format!(
            "onnx:{}",
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        log::debug!("Optimized ONNX plan ready for {}", path.display());

        Ok(Self { plan, name })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        let rejected = |e: TractError| InferenceError::Rejected(format!("{:#}", e));

        let input = Tensor::from_shape(&[1, FEATURE_COUNT], features.as_slice()).map_err(rejected)?;
        let outputs = self.plan.run(tvec!(input.into())).map_err(rejected)?;
        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::Output("model produced no outputs".to_string()))?;

        class_from_tensor(output)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Label outputs (`i64`/`i32`) are taken as-is; `f32` outputs are scores for
/// the first row.
fn class_from_tensor(output: &Tensor) -> Result<i64, InferenceError> {
    let unreadable = |e: TractError| InferenceError::Output(format!("{:#}", e));
    let missing = || InferenceError::Output("empty label tensor".to_string());

    match output.datum_type() {
        DatumType::I64 => output
            .as_slice::<i64>()
            .map_err(unreadable)?
            .first()
            .copied()
            .ok_or_else(missing),
        DatumType::I32 => output
            .as_slice::<i32>()
            .map_err(unreadable)?
            .first()
            .map(|&label| label as i64)
            .ok_or_else(missing),
        DatumType::F32 => {
            let scores = output.as_slice::<f32>().map_err(unreadable)?;
            let row_len = match output.shape() {
                [_, columns, ..] => *columns,
                _ => scores.len(),
            };
            class_from_scores(&scores[..row_len.min(scores.len())])
        }
        other => Err(InferenceError::Output(format!(
            "unsupported output type {:?}",
            other
        ))),
    }
}
