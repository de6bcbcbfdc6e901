use crate::image_classifier::interface::{ClassifierLoader, ImageClassifier, Prediction};
use crate::image_classifier::softmax;
use crate::model_cache::artifact::ModelArtifact;
use crate::model_catalog::ModelSpec;
use image::DynamicImage;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Random softmaxed scores, for running without a model.
pub struct ImageClassifierFake {
    num_labels: usize,
}

impl ImageClassifierFake {
    pub fn new(num_labels: usize) -> Self {
        Self { num_labels }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let logits: Vec<f32> = (0..self.num_labels)
            .map(|_| rng.random_range(-2.0..2.0))
            .collect();

        Ok(Prediction::Scores(softmax(&logits)))
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadCall {
    pub model_name: String,
    pub extractor: Option<String>,
    pub head: String,
}

/// Hands out [`ImageClassifierFake`]s sized to the model's labels and records each call.
pub struct ClassifierLoaderFake {
    calls: Mutex<Vec<LoadCall>>,
    failing: Vec<String>,
    loads: AtomicUsize,
}

impl ClassifierLoaderFake {
    pub fn new() -> Self {
        Self::failing(&[])
    }

    /// Loader that fails for the listed model names.
    pub fn failing(names: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: names.iter().map(|n| n.to_string()).collect(),
            loads: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<LoadCall> {
        self.calls.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    #[allow(dead_code)]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ClassifierLoader for ClassifierLoaderFake {
    fn load(
        &self,
        spec: &ModelSpec,
        extractor: Option<ModelArtifact>,
        head: ModelArtifact,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(LoadCall {
                model_name: spec.model_name.clone(),
                extractor: extractor.map(|a| a.name),
                head: head.name,
            });

        if self.failing.contains(&spec.model_name) {
            return Err(format!("Could not build {}", spec.model_name).into());
        }

        Ok(Arc::new(ImageClassifierFake::new(spec.labels.len())))
    }
}
