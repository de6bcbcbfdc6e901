use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model {name} has unsupported format {format:?}")]
    UnsupportedFormat { name: String, format: String },

    #[error("Model produced no output")]
    EmptyOutput,

    #[error("Class index {index} out of range for {len} scores")]
    ClassIndexOutOfRange { index: usize, len: usize },
}
