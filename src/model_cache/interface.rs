use crate::model_cache::artifact::ModelArtifact;
use crate::model_cache::error::ModelCacheError;

/// Local persistent store, keyed by model name.
pub trait ModelStore: Send + Sync {
    fn contains(&self, name: &str) -> Result<bool, ModelCacheError>;
    fn load(&self, name: &str) -> Result<ModelArtifact, ModelCacheError>;
    fn save(&self, artifact: &ModelArtifact) -> Result<(), ModelCacheError>;
}

/// Remote source of models.
pub trait ModelRegistry: Send + Sync {
    fn fetch(&self, name: &str) -> Result<ModelArtifact, ModelCacheError>;
}
