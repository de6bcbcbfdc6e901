use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

pub struct DeviceDisplayConsole {
    display_buffer: Vec<String>,
    width: usize,
}

impl DeviceDisplayConsole {
    pub fn new(num_lines: u8, chars_per_line: u8) -> Self {
        Self {
            display_buffer: vec![String::new(); num_lines as usize],
            width: chars_per_line as usize,
        }
    }

    fn render_display(&self) -> String {
        let border = "─".repeat(self.width);
        let mut out = format!("┌{}┐\n", border);
        for row in &self.display_buffer {
            let padding = self.width - row.chars().count();
            out.push_str(&format!("│{}{}│\n", row, " ".repeat(padding)));
        }
        out.push_str(&format!("└{}┘", border));
        out
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for row in self.display_buffer.iter_mut() {
            row.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let width = self.width;
        let row = self
            .display_buffer
            .get_mut(line as usize)
            .ok_or("Invalid line number")?;

        *row = text.chars().take(width).collect();
        Ok(())
    }

    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", self.render_display());
        Ok(())
    }

    fn num_lines(&self) -> u8 {
        self.display_buffer.len() as u8
    }

    fn chars_per_line(&self) -> u8 {
        self.width as u8
    }
}
