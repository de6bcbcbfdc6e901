use serde::{Deserialize, Serialize};
use std::path::Path;

/// `model.json` as served by the registry. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelManifest {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub weights_manifest: Vec<WeightGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightGroup {
    pub paths: Vec<String>,
}

impl ModelManifest {
    pub fn shard_paths(&self) -> impl Iterator<Item = &str> {
        self.weights_manifest
            .iter()
            .flat_map(|group| group.paths.iter().map(|p| p.as_str()))
    }
}

/// A single path segment: no separators, not `.` or `..`. Model names and shard
/// paths must pass before they reach a URL or the filesystem.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).components().count() == 1
}

fn default_format() -> String {
    "onnx".to_string()
}

/// A model definition plus its weight shards concatenated in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub name: String,
    pub manifest: ModelManifest,
    pub weights: Vec<u8>,
}
