use crate::library::logger::interface::Logger;
use crate::training_upload::encode::train_image_request;
use crate::training_upload::error::UploadError;
use crate::training_upload::interface::TrainingUploader;
use image::DynamicImage;
use std::sync::Arc;
use std::time::Duration;
use ureq::Agent;

pub struct TrainingUploaderHttp {
    endpoint: String,
    agent: Agent,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl TrainingUploaderHttp {
    pub fn new(endpoint: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            agent,
            logger: logger.with_namespace("training_upload"),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/trainImage", self.endpoint)
    }
}

impl TrainingUploader for TrainingUploaderHttp {
    fn upload(
        &self,
        frame: &DynamicImage,
        label: &str,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.url();
        let body = serde_json::to_string(&train_image_request(frame, label)?)?;

        let http_error = |message: String| UploadError::Http {
            url: url.clone(),
            message,
        };

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|err| http_error(err.to_string()))?;

        self.logger.info(response.status_text())?;

        let text = response
            .into_string()
            .map_err(|err| http_error(err.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(&text).map_err(UploadError::from)?;

        Ok(value)
    }
}
