use crate::gesture_app::core::{Effect, Event};
use crate::gesture_app::main::GestureApp;
use crate::image_classifier::interface::Prediction;
use crate::model_cache::cache::ModelOrigin;
use crate::model_catalog::ModelSpec;
use std::time::Instant;

impl GestureApp {
    pub fn run_effect(&self, effect: Effect) {
        if !matches!(effect, Effect::CaptureFrame | Effect::ClassifyFrame { .. }) {
            let _ = self
                .logger
                .info(&format!("Running effect: {}", effect.to_display_string()));
        }

        match effect {
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Event::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::StartCamera => {
                let started = self.device_camera.start();
                if let Err(e) = &started {
                    let _ = self.logger.error(&format!("Camera unavailable: {}", e));
                }
                self.send(Event::CameraStartDone(started));
            }
            Effect::LoadModel { name } => {
                let result = match self.config.models.iter().find(|m| m.model_name == name) {
                    Some(spec) => self.load_classifier(spec),
                    None => Err(format!("Unknown model {}", name).into()),
                };
                match &result {
                    Ok(origin) => {
                        let _ = self
                            .logger
                            .info(&format!("{} loaded from {:?}", name, origin));
                    }
                    Err(e) => {
                        let _ = self
                            .logger
                            .error(&format!("Loading {} failed: {}", name, e));
                    }
                }
                self.send(Event::ModelLoadDone { name, result });
            }
            Effect::CaptureFrame => {
                let frame = self.device_camera.capture_frame();
                if let Err(e) = &frame {
                    let _ = self.logger.warn(&format!("Frame capture failed: {}", e));
                }
                self.send(Event::FrameCaptureDone {
                    frame,
                    captured_at: Instant::now(),
                });
            }
            Effect::ClassifyFrame {
                ticket,
                model,
                frame,
            } => {
                self.send(Event::FrameClassifyStart { ticket });

                let classifier = self
                    .classifiers
                    .read()
                    .unwrap_or_else(|p| p.into_inner())
                    .get(&model)
                    .cloned();

                let result = match classifier {
                    Some(classifier) => classifier.classify(&frame),
                    None => Ok(Prediction::NotLoaded),
                };
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Classification {} failed: {}", ticket, e));
                }

                self.send(Event::FrameClassifyDone {
                    ticket,
                    model,
                    result,
                });
            }
            Effect::UploadTrainImage { label, frame } => {
                let result = self
                    .training_uploader
                    .upload(&frame, &label)
                    .map(|_| ());
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .warn(&format!("Uploading {} frame failed: {}", label, e));
                }
                self.send(Event::UploadDone(result));
            }
            Effect::CancelClassification { ticket } => {
                let _ = self.logger.warn(&format!(
                    "Classification {} cancelled, its result will be ignored",
                    ticket
                ));
            }
            Effect::RetainClassifier { name } => {
                self.classifiers
                    .write()
                    .unwrap_or_else(|p| p.into_inner())
                    .retain(|loaded, _| *loaded == name);
            }
        }
    }

    /// Fetches the feature extractor (if configured) and the head, then installs the classifier
    /// next to any already loaded. [`Effect::RetainClassifier`] evicts the ones no longer selected.
    fn load_classifier(
        &self,
        spec: &ModelSpec,
    ) -> Result<ModelOrigin, Box<dyn std::error::Error + Send + Sync>> {
        let extractor = match &self.config.feature_extractor {
            Some(name) => Some(self.model_cache.fetch_model(name)?.into_artifact()),
            None => None,
        };

        let head = self.model_cache.fetch_model(&spec.model_name)?;
        let origin = head.origin();

        let classifier = self
            .classifier_loader
            .load(spec, extractor, head.into_artifact())?;

        self.classifiers
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(spec.model_name.clone(), classifier);

        Ok(origin)
    }
}
