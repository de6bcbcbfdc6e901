use crate::model_cache::artifact::ModelArtifact;
use crate::model_cache::error::ModelCacheError;
use crate::model_cache::interface::ModelStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct ModelStoreMemory {
    entries: Mutex<HashMap<String, ModelArtifact>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl ModelStoreMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl ModelStore for ModelStoreMemory {
    fn contains(&self, name: &str) -> Result<bool, ModelCacheError> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(entries.contains_key(name))
    }

    fn load(&self, name: &str) -> Result<ModelArtifact, ModelCacheError> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.get(name).cloned().ok_or_else(|| ModelCacheError::Store {
            name: name.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory store"),
        })
    }

    fn save(&self, artifact: &ModelArtifact) -> Result<(), ModelCacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ModelCacheError::Store {
                name: artifact.name.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
            });
        }

        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(artifact.name.clone(), artifact.clone());
        Ok(())
    }
}
