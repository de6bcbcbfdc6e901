use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// One labelled training frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainImage {
    /// Base64 encoded JPEG.
    pub data: String,
    pub class: String,
}

/// Body of `POST {endpoint}/trainImage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainImageRequest {
    #[serde(rename = "imageData")]
    pub image_data: TrainImage,
}

pub trait TrainingUploader: Send + Sync {
    fn upload(
        &self,
        frame: &DynamicImage,
        label: &str,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>;
}
