use crate::device_camera::error::CameraError;
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Replays the images of a directory in file name order, looping forever.
pub struct DeviceCameraImageDir {
    logger: Arc<dyn Logger + Send + Sync>,
    dir: PathBuf,
    frames: Mutex<Vec<PathBuf>>,
    next: AtomicUsize,
}

impl DeviceCameraImageDir {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, dir: impl Into<PathBuf>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("image_dir"),
            dir: dir.into(),
            frames: Mutex::new(Vec::new()),
            next: AtomicUsize::new(0),
        }
    }
}

fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, CameraError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|err| CameraError::Unavailable(format!("{}: {}", dir.display(), err)))?;

    let mut frames: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    frames.sort();

    if frames.is_empty() {
        return Err(CameraError::Unavailable(format!(
            "no images in {}",
            dir.display()
        )));
    }

    Ok(frames)
}

impl DeviceCamera for DeviceCameraImageDir {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let found = list_frames(&self.dir)?;
        self.logger.info(&format!(
            "Streaming {} frames from {}",
            found.len(),
            self.dir.display()
        ))?;

        *self.frames.lock().unwrap_or_else(|p| p.into_inner()) = found;
        self.next.store(0, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.frames.lock().unwrap_or_else(|p| p.into_inner()).clear();
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        let path = {
            let frames = self.frames.lock().unwrap_or_else(|p| p.into_inner());
            if frames.is_empty() {
                return Err(CameraError::NotStarted.into());
            }
            let index = self.next.fetch_add(1, Ordering::SeqCst) % frames.len();
            frames[index].clone()
        };

        let frame = image::open(&path).map_err(|source| CameraError::Frame { path, source })?;
        Ok(frame)
    }
}
