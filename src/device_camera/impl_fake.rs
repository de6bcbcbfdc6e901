use crate::device_camera::error::CameraError;
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, Rgb};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

const SQUARE_SIZE: u32 = 40;

/// Gray frames with a bright square sweeping left to right, plus a little noise.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    resolution: (u32, u32),
    started: AtomicBool,
    frame_count: AtomicU32,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, resolution: (u32, u32)) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            resolution,
            started: AtomicBool::new(false),
            frame_count: AtomicU32::new(0),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        self.started.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.started.store(false, Ordering::SeqCst);
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(CameraError::NotStarted.into());
        }

        let (width, height) = self.resolution;
        let count = self.frame_count.fetch_add(1, Ordering::SeqCst);
        let square_x = square_offset(count, width);
        let square_y = height.saturating_sub(SQUARE_SIZE) / 2;

        let mut rng = rand::rng();
        let frame = ImageBuffer::from_fn(width, height, |x, y| {
            let inside = x >= square_x
                && x < square_x.saturating_add(SQUARE_SIZE)
                && y >= square_y
                && y < square_y + SQUARE_SIZE;
            let base: i16 = if inside { 230 } else { 110 };
            let level = (base + rng.random_range(-6i16..=6)).clamp(0, 255) as u8;
            Rgb([level, level, level])
        });

        Ok(DynamicImage::ImageRgb8(frame))
    }
}

/// Left edge of the square in frame `count`; wraps instead of overflowing on long runs.
fn square_offset(count: u32, width: u32) -> u32 {
    count.wrapping_mul(8) % width.max(1)
}
