use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::impl_image_dir::DeviceCameraImageDir;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use gesture_app::main::GestureApp;
use image_classifier::impl_fake::ClassifierLoaderFake;
use image_classifier::impl_tract::ClassifierLoaderTract;
use image_classifier::interface::ClassifierLoader;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use model_cache::cache::ModelCache;
use model_cache::impl_registry_http::ModelRegistryHttp;
use model_cache::impl_store_fs::ModelStoreFs;
use std::sync::{Arc, Mutex};
use training_upload::impl_http::TrainingUploaderHttp;

mod config;
mod device_camera;
mod device_display;
mod gesture_app;
mod image_classifier;
mod library;
mod model_cache;
mod model_catalog;
mod throttle;
mod training_upload;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &config.frames_dir {
        Some(dir) => Arc::new(DeviceCameraImageDir::new(logger.clone(), dir.clone())),
        None => Arc::new(DeviceCameraFake::new(logger.clone(), config.camera_resolution)),
    };

    let max_labels = config.models.iter().map(|m| m.labels.len()).max().unwrap_or(0);
    let device_display = Arc::new(Mutex::new(DeviceDisplayConsole::new(
        (max_labels + 5).min(u8::MAX as usize) as u8,
        64,
    )));

    let model_cache = Arc::new(ModelCache::new(
        Arc::new(ModelStoreFs::new(config.cache_dir.clone())),
        Arc::new(ModelRegistryHttp::new(&config.models_host)),
        logger.clone(),
    ));

    let classifier_loader: Arc<dyn ClassifierLoader + Send + Sync> = if config.fake_classifier {
        Arc::new(ClassifierLoaderFake::new())
    } else {
        Arc::new(ClassifierLoaderTract::new(config.input_size))
    };

    let training_uploader = Arc::new(TrainingUploaderHttp::new(
        &config.train_endpoint,
        logger.clone(),
    ));

    let gesture_app = GestureApp::new(
        config,
        logger,
        device_camera,
        device_display,
        model_cache,
        classifier_loader,
        training_uploader,
    );

    gesture_app.run()?;

    Ok(())
}
