use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::gesture_app::core::{init, transition, Effect, Event};
use crate::gesture_app::render::Render;
use crate::image_classifier::interface::{ClassifierLoader, ImageClassifier};
use crate::library::logger::interface::Logger;
use crate::model_cache::cache::ModelCache;
use crate::training_upload::interface::TrainingUploader;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};

/// Loaded classifiers by model name.
pub type ClassifierSlot = Arc<RwLock<HashMap<String, Arc<dyn ImageClassifier + Send + Sync>>>>;

#[derive(Clone)]
pub struct GestureApp {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub model_cache: Arc<ModelCache>,
    pub classifier_loader: Arc<dyn ClassifierLoader + Send + Sync>,
    pub training_uploader: Arc<dyn TrainingUploader + Send + Sync>,
    pub classifiers: ClassifierSlot,
    pub render: Render,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl GestureApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        model_cache: Arc<ModelCache>,
        classifier_loader: Arc<dyn ClassifierLoader + Send + Sync>,
        training_uploader: Arc<dyn TrainingUploader + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            render: Render::new(device_display, config.clone()),
            config,
            logger: logger.with_namespace("gesture_app"),
            device_camera,
            model_cache,
            classifier_loader,
            training_uploader,
            classifiers: Arc::new(RwLock::new(HashMap::new())),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    /// Sender for control events (model selection, training labels).
    #[allow(dead_code)]
    pub fn sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    pub fn send(&self, event: Event) {
        let _ = self.event_sender.send(event);
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut current_state, effects) = init(&self.config);

        if let Err(e) = self.render.render(&current_state) {
            let _ = self.logger.warn(&format!("Render failed: {}", e));
        }
        self.spawn_effects(effects);

        loop {
            let event = match self
                .event_receiver
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .recv()
            {
                Ok(event) => event,
                Err(e) => {
                    let _ = self.device_camera.stop();
                    self.model_cache.flush();
                    return Err(e.into());
                }
            };

            if !matches!(event, Event::Tick(_)) {
                let _ = self
                    .logger
                    .info(&format!("event: {}", event.to_display_string()));
            }

            let (new_state, effects) = transition(&self.config, current_state, event);
            current_state = new_state;

            if let Err(e) = self.render.render(&current_state) {
                let _ = self.logger.warn(&format!("Render failed: {}", e));
            }

            self.spawn_effects(effects);
        }
    }
}
