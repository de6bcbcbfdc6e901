use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::gesture_app::core::{CameraStatus, ModelStatus, State};
use crate::model_cache::cache::ModelOrigin;
use crate::model_catalog::to_percent;
use std::sync::{Arc, Mutex};

const BAR_WIDTH: usize = 20;

pub fn render_lines(config: &Config, state: &State) -> Vec<String> {
    let mut lines = vec![];

    lines.push(match &state.camera {
        CameraStatus::Starting => "Camera starting...".to_string(),
        CameraStatus::Streaming => "Camera streaming".to_string(),
        CameraStatus::Unavailable { message } => format!("Camera unavailable: {}", message),
    });

    lines.push(match &state.model {
        ModelStatus::Loading { name } => format!("Loading {}...", name),
        ModelStatus::Ready { name, origin } => format!(
            "{} ready ({})",
            name,
            match origin {
                ModelOrigin::Cache => "cache",
                ModelOrigin::Registry => "registry",
            }
        ),
        ModelStatus::Failed { name, message } => format!("{} failed: {}", name, message),
    });

    let spec = match config.models.get(state.selected_model) {
        Some(spec) => spec,
        None => return lines,
    };

    lines.push(spec.description.clone());

    if let Some((message, _)) = &state.message {
        lines.push(message.clone());
    }

    let scores = state.prediction.clone().unwrap_or_default();
    for (label, score) in spec.labels.iter().zip(&scores) {
        let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
        lines.push(format!(
            "{} {}% {}",
            label,
            to_percent(*score),
            "#".repeat(filled)
        ));
    }

    if let Some(explainer) = spec.explainer_for(&scores) {
        lines.push(spec.explainer_path(explainer));
    }

    lines
}

/// Writes state to the display, skipping frames identical to the last one shown.
#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
    last_lines: Arc<Mutex<Vec<String>>>,
}

impl Render {
    pub fn new(
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        config: Config,
    ) -> Self {
        Self {
            device_display,
            config,
            last_lines: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let lines = render_lines(&self.config, state);

        let mut last_lines = self.last_lines.lock().unwrap_or_else(|p| p.into_inner());
        if *last_lines == lines {
            return Ok(());
        }

        let mut device_display = self.device_display.lock().unwrap_or_else(|p| p.into_inner());
        device_display.clear()?;
        for (i, line) in lines.iter().take(device_display.num_lines() as usize).enumerate() {
            device_display.write_line(i as u8, line)?;
        }
        device_display.present()?;

        *last_lines = lines;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_display::impl_fake::DeviceDisplayFake;
    use crate::gesture_app::core::init;
    use crate::library::logger::impl_memory::LoggerMemory;

    fn ready(config: &Config) -> State {
        let (mut state, _) = init(config);
        state.camera = CameraStatus::Streaming;
        state.model = ModelStatus::Ready {
            name: "hands2-93-0.9880".to_string(),
            origin: ModelOrigin::Cache,
        };
        state
    }

    #[test]
    fn test_score_table_and_explainer() {
        let config = Config::default();
        let mut state = ready(&config);
        state.prediction = Some(vec![0.25, 0.75]);

        assert_eq!(
            render_lines(&config, &state),
            vec![
                "Camera streaming",
                "hands2-93-0.9880 ready (cache)",
                "Open hand recognition",
                "close 25.00% #####",
                "open 75.00% ###############",
                "models/hands2-93-0.9880/classes/opened.jpg",
            ]
        );
    }

    #[test]
    fn test_no_prediction_shows_first_explainer() {
        let config = Config::default();
        let state = ready(&config);

        let lines = render_lines(&config, &state);

        assert_eq!(
            lines.last().map(|l| l.as_str()),
            Some("models/hands2-93-0.9880/classes/closed.jpg")
        );
        assert!(!lines.iter().any(|l| l.contains('%')));
    }

    #[test]
    fn test_unavailable_camera_and_failed_model() {
        let config = Config::default();
        let (mut state, _) = init(&config);
        state.camera = CameraStatus::Unavailable {
            message: "no device".to_string(),
        };
        state.model = ModelStatus::Failed {
            name: "hands2-93-0.9880".to_string(),
            message: "404".to_string(),
        };

        let lines = render_lines(&config, &state);

        assert_eq!(lines[0], "Camera unavailable: no device");
        assert_eq!(lines[1], "hands2-93-0.9880 failed: 404");
    }

    #[test]
    fn test_render_skips_unchanged_frames() {
        let config = Config::default();
        let display = DeviceDisplayFake::new(Arc::new(LoggerMemory::new()), 8);
        let presented = display.presented();
        let render = Render::new(Arc::new(Mutex::new(display)), config.clone());
        let mut state = ready(&config);

        render.render(&state).unwrap();
        render.render(&state).unwrap();
        state.prediction = Some(vec![0.5, 0.5]);
        render.render(&state).unwrap();

        let presented = presented.lock().unwrap();
        assert_eq!(presented.len(), 2);
        assert_eq!(presented[1][3], "close 50.00% ##########");
    }
}
