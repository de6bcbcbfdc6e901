use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::gesture_app::core::Event;
use crate::gesture_app::main::GestureApp;
use crate::image_classifier::impl_fake::ClassifierLoaderFake;
use crate::library::logger::impl_memory::LoggerMemory;
use crate::model_cache::cache::ModelCache;
use crate::model_cache::impl_registry_fake::ModelRegistryFake;
use crate::model_cache::impl_store_memory::ModelStoreMemory;
use crate::training_upload::impl_fake::TrainingUploaderFake;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub logger: LoggerMemory,
    pub device_camera: Arc<DeviceCameraFake>,
    pub model_store: Arc<ModelStoreMemory>,
    pub model_registry: Arc<ModelRegistryFake>,
    pub classifier_loader: Arc<ClassifierLoaderFake>,
    pub training_uploader: Arc<TrainingUploaderFake>,
    pub gesture_app: GestureApp,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_loader(ClassifierLoaderFake::new())
    }

    pub fn with_loader(classifier_loader: ClassifierLoaderFake) -> Self {
        let config = Config {
            camera_resolution: (64, 48),
            ..Config::default()
        };
        let logger = LoggerMemory::new();
        let device_camera = Arc::new(DeviceCameraFake::new(
            Arc::new(logger.clone()),
            config.camera_resolution,
        ));
        let device_display = Arc::new(Mutex::new(DeviceDisplayFake::new(
            Arc::new(logger.clone()),
            20,
        )));
        let model_store = Arc::new(ModelStoreMemory::new());
        let model_registry = Arc::new(ModelRegistryFake::new(&[
            "mobileNet",
            "hands2-93-0.9880",
            "handsMulti-47-0.8496",
        ]));
        let model_cache = Arc::new(ModelCache::new(
            model_store.clone(),
            model_registry.clone(),
            Arc::new(logger.clone()),
        ));
        let classifier_loader = Arc::new(classifier_loader);
        let training_uploader = Arc::new(TrainingUploaderFake::new());

        let gesture_app = GestureApp::new(
            config.clone(),
            Arc::new(logger.clone()),
            device_camera.clone(),
            device_display,
            model_cache,
            classifier_loader.clone(),
            training_uploader.clone(),
        );

        Self {
            config,
            logger,
            device_camera,
            model_store,
            model_registry,
            classifier_loader,
            training_uploader,
            gesture_app,
        }
    }

    /// Next event the app sent to itself.
    pub fn next_event(&self) -> Event {
        self.gesture_app
            .event_receiver
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
    }
}
