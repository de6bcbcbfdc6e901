use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    #[error("Camera not started")]
    NotStarted,

    #[error("Could not read frame {path}: {source}")]
    Frame {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
