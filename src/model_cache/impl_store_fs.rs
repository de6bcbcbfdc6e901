use crate::model_cache::artifact::{is_plain_name, ModelArtifact, ModelManifest};
use crate::model_cache::error::ModelCacheError;
use crate::model_cache::interface::ModelStore;
use std::fs;
use std::path::PathBuf;

const MANIFEST_FILE: &str = "model.json";
const WEIGHTS_FILE: &str = "weights.bin";

/// One directory per model under `root`, holding `model.json` and `weights.bin`.
pub struct ModelStoreFs {
    root: PathBuf,
}

impl ModelStoreFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn model_dir(&self, name: &str) -> Result<PathBuf, ModelCacheError> {
        if !is_plain_name(name) {
            return Err(ModelCacheError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

fn store_error(name: &str) -> impl FnOnce(std::io::Error) -> ModelCacheError + '_ {
    move |source| ModelCacheError::Store {
        name: name.to_string(),
        source,
    }
}

impl ModelStore for ModelStoreFs {
    fn contains(&self, name: &str) -> Result<bool, ModelCacheError> {
        let dir = self.model_dir(name)?;
        Ok(dir.join(MANIFEST_FILE).is_file() && dir.join(WEIGHTS_FILE).is_file())
    }

    fn load(&self, name: &str) -> Result<ModelArtifact, ModelCacheError> {
        let dir = self.model_dir(name)?;
        let manifest_bytes = fs::read(dir.join(MANIFEST_FILE)).map_err(store_error(name))?;
        let manifest: ModelManifest = serde_json::from_slice(&manifest_bytes)?;
        let weights = fs::read(dir.join(WEIGHTS_FILE)).map_err(store_error(name))?;

        Ok(ModelArtifact {
            name: name.to_string(),
            manifest,
            weights,
        })
    }

    fn save(&self, artifact: &ModelArtifact) -> Result<(), ModelCacheError> {
        let dir = self.model_dir(&artifact.name)?;
        fs::create_dir_all(&dir).map_err(store_error(&artifact.name))?;

        // manifest last: `contains` only sees complete entries
        fs::write(dir.join(WEIGHTS_FILE), &artifact.weights).map_err(store_error(&artifact.name))?;
        let manifest = serde_json::to_vec_pretty(&artifact.manifest)?;
        fs::write(dir.join(MANIFEST_FILE), manifest).map_err(store_error(&artifact.name))?;

        Ok(())
    }
}
