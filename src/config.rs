use crate::model_catalog::{catalog, ModelSpec};
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub predictions_per_second: u32,
    pub prediction_queue_cap: usize,
    /// Lets the next classification start once the previous one reached its
    /// worker instead of after it completed. Off by default.
    pub release_busy_on_dispatch: bool,
    pub snaps_per_second: u32,
    pub inference_timeout: Option<Duration>,
    pub models_host: String,
    pub train_endpoint: String,
    pub cache_dir: PathBuf,
    pub frames_dir: Option<PathBuf>,
    pub camera_resolution: (u32, u32),
    /// Model run ahead of the head. The catalog heads take the image directly.
    pub feature_extractor: Option<String>,
    /// Random scores instead of tract inference. Models are still fetched.
    pub fake_classifier: bool,
    pub input_size: u32,
    pub models: Vec<ModelSpec>,
    pub logger_timezone: chrono::FixedOffset,
    pub display_message_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(16),
            predictions_per_second: 10,
            prediction_queue_cap: 5,
            release_busy_on_dispatch: false,
            snaps_per_second: 3,
            inference_timeout: Some(Duration::from_secs(5)),
            models_host: "http://127.0.0.1:8085".to_string(),
            train_endpoint: "http://127.0.0.1:8085".to_string(),
            cache_dir: PathBuf::from(".model-cache"),
            frames_dir: None,
            camera_resolution: (640, 480),
            feature_extractor: None,
            fake_classifier: false,
            input_size: 224,
            models: catalog(),
            logger_timezone: utc(),
            display_message_duration: Duration::from_secs(2),
        }
    }
}

impl Config {
    pub fn min_prediction_interval(&self) -> Duration {
        per_second(self.predictions_per_second)
    }

    pub fn min_snap_interval(&self) -> Duration {
        per_second(self.snaps_per_second)
    }
}

fn per_second(rate: u32) -> Duration {
    Duration::from_secs(1) / rate.max(1)
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
