use std::error::Error;

/// A fixed grid of text lines. Writes are buffered until `present`.
pub trait DeviceDisplay: Send + Sync {
    /// Blank every line.
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a line (0-based), truncated to the display width.
    /// Returns an error if the line does not exist.
    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show the buffered lines.
    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn num_lines(&self) -> u8;

    #[allow(dead_code)]
    fn chars_per_line(&self) -> u8;
}
