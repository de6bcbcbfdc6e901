use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Could not encode frame: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Upload to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Invalid response: {0}")]
    Response(#[from] serde_json::Error),
}
