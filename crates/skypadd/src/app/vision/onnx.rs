use std::path::Path;

use tract_onnx::prelude::*;

use super::classify::{Classifier, Frame};
use super::VisionError;

/// ONNX image classifier taking a `1x3xNxN` float input.
pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
    size: usize,
}

impl OnnxClassifier {
    pub fn load(path: &Path, size: usize) -> Result<Self, VisionError> {
        let model_error = |e: TractError| VisionError::Model(path.display().to_string(), e.to_string());
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, 3, size, size]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(model_error)?;
        Ok(Self { plan, size })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&mut self, frame: &Frame) -> Result<Vec<f32>, VisionError> {
        let blob = frame.to_blob(self.size);
        let input: Tensor = tract_ndarray::Array4::from_shape_vec((1, 3, self.size, self.size), blob)
            .map_err(|e| VisionError::Inference(e.to_string()))?
            .into();
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| VisionError::Inference(e.to_string()))?;
        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| VisionError::Inference(e.to_string()))?;
        Ok(scores.iter().copied().collect())
    }
}
