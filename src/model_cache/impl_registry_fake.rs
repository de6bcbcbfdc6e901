use crate::model_cache::artifact::{ModelArtifact, ModelManifest, WeightGroup};
use crate::model_cache::error::ModelCacheError;
use crate::model_cache::interface::ModelRegistry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ModelRegistryFake {
    artifacts: HashMap<String, ModelArtifact>,
    fetches: AtomicUsize,
}

impl ModelRegistryFake {
    pub fn new(names: &[&str]) -> Self {
        let artifacts = names
            .iter()
            .map(|name| (name.to_string(), fake_artifact(name)))
            .collect();

        Self {
            artifacts,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

pub fn fake_artifact(name: &str) -> ModelArtifact {
    ModelArtifact {
        name: name.to_string(),
        manifest: ModelManifest {
            format: "onnx".to_string(),
            weights_manifest: vec![WeightGroup {
                paths: vec!["group1-shard1of1".to_string()],
            }],
            input_size: None,
        },
        weights: name.as_bytes().to_vec(),
    }
}

impl ModelRegistry for ModelRegistryFake {
    fn fetch(&self, name: &str) -> Result<ModelArtifact, ModelCacheError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.artifacts
            .get(name)
            .cloned()
            .ok_or_else(|| ModelCacheError::NotFound(name.to_string()))
    }
}
