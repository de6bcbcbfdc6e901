use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelCacheError {
    #[error("Invalid model name: {0:?}")]
    InvalidName(String),

    #[error("Model {name} lists invalid shard path {path:?}")]
    InvalidShard { name: String, path: String },

    #[error("Model {0} not found in registry")]
    NotFound(String),

    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Model store failed for {name}: {source}")]
    Store {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
