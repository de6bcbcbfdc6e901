use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{
    ClassifierLoader, ImageClassifier, InferenceStage, OutputKind, Prediction,
};
use crate::image_classifier::preprocess::prepare_input;
use crate::model_cache::artifact::ModelArtifact;
use crate::model_catalog::ModelSpec;
use image::DynamicImage;
use std::io::Cursor;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct TractStage {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
}

impl TractStage {
    /// `input_size` pins the input to `[1, size, size, 3]`; `None` keeps the model's own input fact.
    pub fn new(
        artifact: &ModelArtifact,
        input_size: Option<u32>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if artifact.manifest.format != "onnx" {
            return Err(ClassifierError::UnsupportedFormat {
                name: artifact.name.clone(),
                format: artifact.manifest.format.clone(),
            }
            .into());
        }

        let mut model = tract_onnx::onnx().model_for_read(&mut Cursor::new(&artifact.weights))?;

        if let Some(size) = input_size {
            let size = size as usize;
            model = model.with_input_fact(0, f32::fact([1, size, size, 3]).into())?;
        }

        let model = model.into_optimized()?.into_runnable()?;

        Ok(Self { model })
    }
}

impl InferenceStage for TractStage {
    fn forward(&self, input: Tensor) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .into_iter()
            .next()
            .ok_or(ClassifierError::EmptyOutput)?;

        Ok(output.into_tensor())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub input_size: u32,
    pub use_feature_extractor: bool,
    pub output: OutputKind,
}

/// Crop, resize, scale, then run the optional feature extractor and the head. Batch size 1.
pub struct GestureClassifier {
    config: ClassifierConfig,
    extractor: Option<Box<dyn InferenceStage>>,
    head: Option<Box<dyn InferenceStage>>,
}

impl GestureClassifier {
    pub fn new(
        config: ClassifierConfig,
        extractor: Option<Box<dyn InferenceStage>>,
        head: Option<Box<dyn InferenceStage>>,
    ) -> Self {
        Self {
            config,
            extractor,
            head,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.head.is_some() && (!self.config.use_feature_extractor || self.extractor.is_some())
    }
}

impl ImageClassifier for GestureClassifier {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        let head = match &self.head {
            Some(head) if self.is_loaded() => head,
            _ => return Ok(Prediction::NotLoaded),
        };

        let mut input = prepare_input(image, self.config.input_size);

        if self.config.use_feature_extractor {
            if let Some(extractor) = &self.extractor {
                input = extractor.forward(input)?;
            }
        }

        let output = head.forward(input)?;
        let scores = output.as_slice::<f32>()?;

        match self.config.output {
            OutputKind::Scores { softmax: true } => Ok(Prediction::Scores(super::softmax(scores))),
            OutputKind::Scores { softmax: false } => Ok(Prediction::Scores(scores.to_vec())),
            OutputKind::Binary { class_index } => scores
                .get(class_index)
                .map(|p| Prediction::Binary(*p))
                .ok_or_else(|| {
                    ClassifierError::ClassIndexOutOfRange {
                        index: class_index,
                        len: scores.len(),
                    }
                    .into()
                }),
        }
    }
}

pub struct ClassifierLoaderTract {
    input_size: u32,
}

impl ClassifierLoaderTract {
    pub fn new(input_size: u32) -> Self {
        Self { input_size }
    }
}

impl ClassifierLoader for ClassifierLoaderTract {
    fn load(
        &self,
        spec: &ModelSpec,
        extractor: Option<ModelArtifact>,
        head: ModelArtifact,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        let input_size = head.manifest.input_size.unwrap_or(self.input_size);

        let extractor = match extractor {
            Some(artifact) => {
                let size = artifact.manifest.input_size.unwrap_or(input_size);
                let stage: Box<dyn InferenceStage> = Box::new(TractStage::new(&artifact, Some(size))?);
                Some((stage, size))
            }
            None => None,
        };

        let (extractor, input_size, head_input) = match extractor {
            Some((stage, size)) => (Some(stage), size, None),
            None => (None, input_size, Some(input_size)),
        };

        let head: Box<dyn InferenceStage> = Box::new(TractStage::new(&head, head_input)?);

        let config = ClassifierConfig {
            input_size,
            use_feature_extractor: extractor.is_some(),
            output: spec.output.clone(),
        };

        Ok(Arc::new(GestureClassifier::new(config, extractor, Some(head))))
    }
}
