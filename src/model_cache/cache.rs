use crate::library::logger::interface::Logger;
use crate::model_cache::artifact::ModelArtifact;
use crate::model_cache::error::ModelCacheError;
use crate::model_cache::interface::{ModelRegistry, ModelStore};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOrigin {
    Cache,
    Registry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    Cached(ModelArtifact),
    Fetched(ModelArtifact),
}

impl ModelSource {
    pub fn origin(&self) -> ModelOrigin {
        match self {
            ModelSource::Cached(_) => ModelOrigin::Cache,
            ModelSource::Fetched(_) => ModelOrigin::Registry,
        }
    }

    #[allow(dead_code)]
    pub fn artifact(&self) -> &ModelArtifact {
        match self {
            ModelSource::Cached(artifact) | ModelSource::Fetched(artifact) => artifact,
        }
    }

    pub fn into_artifact(self) -> ModelArtifact {
        match self {
            ModelSource::Cached(artifact) | ModelSource::Fetched(artifact) => artifact,
        }
    }
}

/// Cache-or-fetch over a local store and a remote registry.
///
/// Fetched models are written back to the store in the background. A failed
/// write is logged and otherwise ignored; entries are never invalidated.
pub struct ModelCache {
    store: Arc<dyn ModelStore>,
    registry: Arc<dyn ModelRegistry>,
    logger: Arc<dyn Logger + Send + Sync>,
    pending_writes: Mutex<Vec<JoinHandle<()>>>,
}

impl ModelCache {
    pub fn new(
        store: Arc<dyn ModelStore>,
        registry: Arc<dyn ModelRegistry>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            store,
            registry,
            logger: logger.with_namespace("model_cache"),
            pending_writes: Mutex::new(Vec::new()),
        }
    }

    pub fn fetch_model(&self, name: &str) -> Result<ModelSource, ModelCacheError> {
        match self.store.contains(name) {
            Ok(true) => match self.store.load(name) {
                Ok(artifact) => {
                    let _ = self.logger.info(&format!("Loaded {} from local cache", name));
                    return Ok(ModelSource::Cached(artifact));
                }
                Err(err) => {
                    let _ = self
                        .logger
                        .warn(&format!("Cached {} unreadable, refetching: {}", name, err));
                }
            },
            Ok(false) => {}
            Err(err) => {
                let _ = self
                    .logger
                    .warn(&format!("Local cache lookup for {} failed: {}", name, err));
            }
        }

        let _ = self.logger.info(&format!("Loading {} from registry", name));
        let artifact = self.registry.fetch(name)?;
        self.persist(artifact.clone());

        Ok(ModelSource::Fetched(artifact))
    }

    /// Waits for background cache writes started so far.
    pub fn flush(&self) {
        let handles: Vec<JoinHandle<()>> = self
            .pending_writes
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .drain(..)
            .collect();

        for handle in handles {
            let _ = handle.join();
        }
    }

    fn persist(&self, artifact: ModelArtifact) {
        let store = Arc::clone(&self.store);
        let logger = Arc::clone(&self.logger);

        let handle = std::thread::spawn(move || match store.save(&artifact) {
            Ok(()) => {
                let _ = logger.info(&format!("{} saved to local cache", artifact.name));
            }
            Err(err) => {
                let _ = logger.warn(&format!(
                    "Saving {} to local cache failed: {}",
                    artifact.name, err
                ));
            }
        });

        let mut pending = self.pending_writes.lock().unwrap_or_else(|p| p.into_inner());
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}
