use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Logs every call and keeps what was last presented.
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    buffer: Vec<String>,
    presented: Arc<Mutex<Vec<Vec<String>>>>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, num_lines: u8) -> Self {
        Self {
            logger,
            buffer: vec![String::new(); num_lines as usize],
            presented: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every frame shown so far, oldest first.
    pub fn presented(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        self.presented.clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("DeviceDisplayFake::clear()")?;
        for row in self.buffer.iter_mut() {
            row.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info(&format!(
            "DeviceDisplayFake::write_line({}, {})",
            line, text
        ))?;
        let row = self
            .buffer
            .get_mut(line as usize)
            .ok_or("Invalid line number")?;
        *row = text.to_string();
        Ok(())
    }

    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("DeviceDisplayFake::present()")?;
        self.presented
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(self.buffer.clone());
        Ok(())
    }

    fn num_lines(&self) -> u8 {
        self.buffer.len() as u8
    }

    fn chars_per_line(&self) -> u8 {
        u8::MAX
    }
}
