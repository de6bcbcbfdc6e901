use image::DynamicImage;

pub trait DeviceCamera: Send + Sync {
    /// Fails when no camera is available. Callers do not retry.
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;
}
