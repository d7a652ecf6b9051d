/// Scoring Model Inference
///
/// Loads the pre-fitted ONNX regression artifact with tract-onnx and runs
/// batched inference. The model is opaque to the service: a batch of
/// 2-feature rows in, one predicted rating per row out, in input order. It is
/// loaded once at process start; a missing or unloadable artifact is fatal
/// because no request can be served without it.
use super::{RecommendationError, Result};
use ndarray::{Array1, Array2};
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::{tvec, Framework, InferenceModelExt, Tensor};
use tracing::debug;

/// (genre code, rating level)
const FEATURE_VECTOR_SIZE: usize = 2;

type OnnxPlan = tract_onnx::prelude::SimplePlan<
    tract_onnx::prelude::TypedFact,
    Box<dyn tract_onnx::prelude::TypedOp>,
    tract_onnx::prelude::Graph<
        tract_onnx::prelude::TypedFact,
        Box<dyn tract_onnx::prelude::TypedOp>,
    >,
>;

pub struct ScoringModel {
    kind: ModelKind,
}

enum ModelKind {
    Onnx(Arc<OnnxPlan>),
    /// Scores a row with its rating-level feature. Stand-in for tests and
    /// local development; mirrors the reference artifact, whose predictions
    /// approximate an identity mapping on that feature.
    Identity,
}

impl ScoringModel {
    /// Load the ONNX model from disk. Startup must abort on failure.
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(RecommendationError::ModelLoad(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| RecommendationError::ModelLoad(e.to_string()))?;

        debug!("Loaded ONNX recommendation model from {}", path.display());

        Ok(Self {
            kind: ModelKind::Onnx(Arc::new(plan)),
        })
    }

    /// Identity scoring stand-in (no artifact required)
    pub fn identity() -> Self {
        debug!("Using identity scoring model");
        Self {
            kind: ModelKind::Identity,
        }
    }

    /// Predict one rating per feature row, preserving input order
    pub fn predict(&self, features: Array2<f32>) -> Result<Array1<f32>> {
        if features.shape()[1] != FEATURE_VECTOR_SIZE {
            return Err(RecommendationError::InvalidInput(format!(
                "expected {} features, got {}",
                FEATURE_VECTOR_SIZE,
                features.shape()[1]
            )));
        }

        match &self.kind {
            ModelKind::Onnx(plan) => Self::predict_onnx(plan, features),
            ModelKind::Identity => Ok(features.column(1).to_owned()),
        }
    }

    fn predict_onnx(plan: &OnnxPlan, features: Array2<f32>) -> Result<Array1<f32>> {
        let batch_size = features.shape()[0];

        let input_tensor = tract_onnx::prelude::tract_ndarray::Array2::from_shape_fn(
            (batch_size, FEATURE_VECTOR_SIZE),
            |(i, j)| features[[i, j]],
        );

        let input = tvec![Tensor::from(input_tensor.into_dyn()).into()];
        let output = plan
            .run(input)
            .map_err(|e| RecommendationError::Inference(e.to_string()))?;

        let scores = output[0]
            .to_array_view::<f32>()
            .map_err(|e| RecommendationError::Inference(e.to_string()))?;

        if scores.len() != batch_size {
            return Err(RecommendationError::Inference(format!(
                "model returned {} scores for {} rows",
                scores.len(),
                batch_size
            )));
        }

        Ok(Array1::from_iter(scores.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_model_returns_level_feature_in_order() {
        let model = ScoringModel::identity();

        let features =
            Array2::from_shape_vec((3, 2), vec![0.0, 1.0, 0.0, 4.0, 2.0, 5.0]).unwrap();

        let scores = model.predict(features).unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0], 1.0);
        assert_eq!(scores[1], 4.0);
        assert_eq!(scores[2], 5.0);
    }

    #[test]
    fn rejects_wrong_feature_width() {
        let model = ScoringModel::identity();

        let features = Array2::from_shape_vec((1, 3), vec![1.0, 2.0, 3.0]).unwrap();

        let result = model.predict(features);

        assert!(matches!(result, Err(RecommendationError::InvalidInput(_))));
    }

    #[test]
    fn missing_artifact_is_a_load_error() {
        let result = ScoringModel::load("/nonexistent/model.onnx");

        assert!(matches!(result, Err(RecommendationError::ModelLoad(_))));
    }
}
