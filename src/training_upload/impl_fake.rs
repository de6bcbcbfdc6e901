use crate::training_upload::encode::encode_frame;
use crate::training_upload::interface::TrainingUploader;
use image::DynamicImage;
use std::sync::Mutex;

/// Records `(label, encoded frame)` pairs.
#[derive(Default)]
pub struct TrainingUploaderFake {
    uploads: Mutex<Vec<(String, String)>>,
}

impl TrainingUploaderFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }
}

impl TrainingUploader for TrainingUploaderFake {
    fn upload(
        &self,
        frame: &DynamicImage,
        label: &str,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let data = encode_frame(frame)?;
        self.uploads
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((label.to_string(), data));
        Ok(serde_json::json!({}))
    }
}
