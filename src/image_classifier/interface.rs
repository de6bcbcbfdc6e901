use crate::model_cache::artifact::ModelArtifact;
use crate::model_catalog::ModelSpec;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::Tensor;

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// One score per class label.
    Scores(Vec<f32>),
    /// Confidence of the positive class of a two-class model.
    Binary(f32),
    /// No model loaded yet.
    NotLoaded,
}

impl Prediction {
    /// Scores in label order. `Binary(p)` maps to `[1 - p, p]`.
    pub fn scores(&self) -> Option<Vec<f32>> {
        match self {
            Prediction::Scores(scores) => Some(scores.clone()),
            Prediction::Binary(p) => Some(vec![1.0 - p, *p]),
            Prediction::NotLoaded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputKind {
    Scores { softmax: bool },
    Binary { class_index: usize },
}

pub trait ImageClassifier: Send + Sync {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>>;
}

/// Builds a classifier for `spec` from its head and, if configured, the shared feature extractor.
pub trait ClassifierLoader: Send + Sync {
    fn load(
        &self,
        spec: &ModelSpec,
        extractor: Option<ModelArtifact>,
        head: ModelArtifact,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>;
}

/// One forward pass of a loaded network.
pub trait InferenceStage: Send + Sync {
    fn forward(&self, input: Tensor) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_maps_to_two_scores() {
        assert_eq!(Prediction::Binary(0.75).scores(), Some(vec![0.25, 0.75]));
        assert_eq!(Prediction::Scores(vec![0.1]).scores(), Some(vec![0.1]));
        assert_eq!(Prediction::NotLoaded.scores(), None);
    }
}
