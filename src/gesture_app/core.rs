use crate::config::Config;
use crate::image_classifier::interface::Prediction;
use crate::model_cache::cache::ModelOrigin;
use crate::throttle::{Throttle, TicketId};
use image::DynamicImage;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Loading { name: String },
    Ready { name: String, origin: ModelOrigin },
    /// Stays failed until a model is selected again.
    Failed { name: String, message: String },
}

impl ModelStatus {
    pub fn name(&self) -> &str {
        match self {
            ModelStatus::Loading { name }
            | ModelStatus::Ready { name, .. }
            | ModelStatus::Failed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraStatus {
    Starting,
    Streaming,
    /// Terminal. The capture loop never starts.
    Unavailable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    Idle,
    Capturing,
}

/// Frames are uploaded under `label` while it is set.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingCapture {
    pub label: String,
    pub last_snap: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct State {
    pub selected_model: usize,
    pub model: ModelStatus,
    pub camera: CameraStatus,
    pub capture: CaptureStatus,
    pub throttle: Throttle,
    pub prediction: Option<Vec<f32>>,
    pub training: Option<TrainingCapture>,
    pub message: Option<(String, Instant)>,
}

#[derive(Debug)]
pub enum Event {
    Tick(Instant),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ModelLoadDone {
        name: String,
        result: Result<ModelOrigin, Box<dyn std::error::Error + Send + Sync>>,
    },
    FrameCaptureDone {
        frame: Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>,
        captured_at: Instant,
    },
    FrameClassifyStart {
        ticket: TicketId,
    },
    FrameClassifyDone {
        ticket: TicketId,
        model: String,
        result: Result<Prediction, Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Control input, sent through [`GestureApp::sender`](crate::gesture_app::main::GestureApp::sender).
    #[allow(dead_code)]
    SelectModel(usize),
    /// Control input. `Some(label)` starts uploading frames under `label`, `None` stops.
    #[allow(dead_code)]
    TrainingLabel(Option<String>),
    UploadDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::FrameCaptureDone {
                frame: Ok(frame),
                captured_at,
            } => format!(
                "FrameCaptureDone {{ frame: Ok({}x{}), captured_at: {:?} }}",
                frame.width(),
                frame.height(),
                captured_at
            ),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    StartCamera,
    SubscribeTick,
    LoadModel {
        name: String,
    },
    CaptureFrame,
    ClassifyFrame {
        ticket: TicketId,
        model: String,
        frame: DynamicImage,
    },
    UploadTrainImage {
        label: String,
        frame: DynamicImage,
    },
    CancelClassification {
        ticket: TicketId,
    },
    /// Drops every loaded classifier except `name`.
    RetainClassifier {
        name: String,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::ClassifyFrame { ticket, model, .. } => {
                format!("ClassifyFrame {{ ticket: {}, model: {:?} }}", ticket, model)
            }
            Effect::UploadTrainImage { label, .. } => {
                format!("UploadTrainImage {{ label: {:?} }}", label)
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init(config: &Config) -> (State, Vec<Effect>) {
    let mut effects = vec![Effect::StartCamera, Effect::SubscribeTick];

    let model = match config.models.first() {
        Some(spec) => {
            effects.push(Effect::LoadModel {
                name: spec.model_name.clone(),
            });
            ModelStatus::Loading {
                name: spec.model_name.clone(),
            }
        }
        None => ModelStatus::Failed {
            name: String::new(),
            message: "No models configured".to_string(),
        },
    };

    let state = State {
        selected_model: 0,
        model,
        camera: CameraStatus::Starting,
        capture: CaptureStatus::Idle,
        throttle: Throttle::new(config.min_prediction_interval(), config.prediction_queue_cap)
            .with_release_on_dispatch(config.release_busy_on_dispatch),
        prediction: None,
        training: None,
        message: None,
    };

    (state, effects)
}

pub fn transition(config: &Config, mut state: State, event: Event) -> (State, Vec<Effect>) {
    let mut effects = vec![];

    match event {
        Event::Tick(now) => {
            if let Some(timeout) = config.inference_timeout {
                for ticket in state.throttle.cancel_stale(now, timeout) {
                    effects.push(Effect::CancelClassification { ticket });
                }
            }

            if let Some((_, shown_at)) = &state.message {
                if now.saturating_duration_since(*shown_at) >= config.display_message_duration {
                    state.message = None;
                }
            }

            if state.camera == CameraStatus::Streaming && state.capture == CaptureStatus::Idle {
                state.capture = CaptureStatus::Capturing;
                effects.push(Effect::CaptureFrame);
            }
        }

        Event::CameraStartDone(Ok(())) => {
            state.camera = CameraStatus::Streaming;
            state.capture = CaptureStatus::Idle;
        }
        Event::CameraStartDone(Err(err)) => {
            state.camera = CameraStatus::Unavailable {
                message: err.to_string(),
            };
        }

        Event::FrameCaptureDone {
            frame: Ok(frame),
            captured_at,
        } => {
            state.capture = CaptureStatus::Idle;

            if let Some(training) = state.training.as_mut() {
                let due = training.last_snap.map_or(true, |last| {
                    captured_at.saturating_duration_since(last) >= config.min_snap_interval()
                });
                if due {
                    training.last_snap = Some(captured_at);
                    effects.push(Effect::UploadTrainImage {
                        label: training.label.clone(),
                        frame: frame.clone(),
                    });
                }
            }

            if let ModelStatus::Ready { name, .. } = &state.model {
                if let Some(ticket) = state.throttle.try_acquire(captured_at) {
                    effects.push(Effect::ClassifyFrame {
                        ticket: ticket.id,
                        model: name.clone(),
                        frame,
                    });
                }
            }
        }
        Event::FrameCaptureDone { frame: Err(_), .. } => {
            state.capture = CaptureStatus::Idle;
        }

        Event::FrameClassifyStart { ticket } => {
            state.throttle.mark_dispatched(ticket);
        }

        Event::FrameClassifyDone {
            ticket,
            model,
            result,
        } => {
            let live = state.throttle.complete(ticket);
            let current = matches!(&state.model, ModelStatus::Ready { name, .. } if *name == model);

            if live && current {
                if let Ok(prediction) = result {
                    if let Some(scores) = prediction.scores() {
                        state.prediction = Some(scores);
                    }
                }
            }
        }

        Event::ModelLoadDone { name, result } => {
            if matches!(state.model, ModelStatus::Loading { .. }) && state.model.name() == name {
                state.model = match result {
                    Ok(origin) => ModelStatus::Ready { name, origin },
                    Err(err) => ModelStatus::Failed {
                        name,
                        message: err.to_string(),
                    },
                };
            }

            // loads finish in any order, only the current model may stay installed
            effects.push(Effect::RetainClassifier {
                name: state.model.name().to_string(),
            });
        }

        Event::SelectModel(index) => {
            let reload = index != state.selected_model
                || matches!(state.model, ModelStatus::Failed { .. });

            if let (Some(spec), true) = (config.models.get(index), reload) {
                for ticket in state.throttle.tickets() {
                    state.throttle.cancel(ticket);
                    effects.push(Effect::CancelClassification { ticket });
                }

                state.selected_model = index;
                state.prediction = None;
                state.model = ModelStatus::Loading {
                    name: spec.model_name.clone(),
                };
                effects.push(Effect::LoadModel {
                    name: spec.model_name.clone(),
                });
            }
        }

        Event::TrainingLabel(Some(label)) => {
            let changed = state.training.as_ref().map(|t| &t.label) != Some(&label);
            if changed {
                state.message = Some((format!("Saving images of {} class", label), Instant::now()));
                state.training = Some(TrainingCapture {
                    label,
                    last_snap: None,
                });
            }
        }
        Event::TrainingLabel(None) => {
            state.training = None;
        }

        Event::UploadDone(Ok(())) => {}
        Event::UploadDone(Err(_)) => {
            state.message = Some(("Training upload failed".to_string(), Instant::now()));
        }
    }

    (state, effects)
}
