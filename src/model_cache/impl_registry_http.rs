use crate::model_cache::artifact::{is_plain_name, ModelArtifact, ModelManifest};
use crate::model_cache::error::ModelCacheError;
use crate::model_cache::interface::ModelRegistry;
use std::io::Read;
use std::time::Duration;
use ureq::Agent;

/// Serves `{host}/models/{name}/model.json` plus the shards it lists.
pub struct ModelRegistryHttp {
    host: String,
    agent: Agent,
}

impl ModelRegistryHttp {
    pub fn new(host: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .build();

        Self {
            host: host.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn model_url(&self, name: &str, file: &str) -> String {
        format!("{}/models/{}/{}", self.host, name, file)
    }

    fn get(&self, name: &str, url: &str) -> Result<ureq::Response, ModelCacheError> {
        self.agent.get(url).call().map_err(|err| match err {
            ureq::Error::Status(404, _) => ModelCacheError::NotFound(name.to_string()),
            err => ModelCacheError::Http {
                url: url.to_string(),
                message: err.to_string(),
            },
        })
    }
}

impl ModelRegistry for ModelRegistryHttp {
    fn fetch(&self, name: &str) -> Result<ModelArtifact, ModelCacheError> {
        if !is_plain_name(name) {
            return Err(ModelCacheError::InvalidName(name.to_string()));
        }

        let manifest_url = self.model_url(name, "model.json");
        let manifest: ModelManifest =
            serde_json::from_reader(self.get(name, &manifest_url)?.into_reader())?;

        if let Some(path) = manifest.shard_paths().find(|path| !is_plain_name(path)) {
            return Err(ModelCacheError::InvalidShard {
                name: name.to_string(),
                path: path.to_string(),
            });
        }

        let mut weights = Vec::new();
        for path in manifest.shard_paths() {
            let shard_url = self.model_url(name, path);
            self.get(name, &shard_url)?
                .into_reader()
                .read_to_end(&mut weights)
                .map_err(|err| ModelCacheError::Http {
                    url: shard_url.clone(),
                    message: err.to_string(),
                })?;
        }

        Ok(ModelArtifact {
            name: name.to_string(),
            manifest,
            weights,
        })
    }
}
