use crate::training_upload::error::UploadError;
use crate::training_upload::interface::{TrainImage, TrainImageRequest};
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// JPEG, base64 encoded.
pub fn encode_frame(frame: &DynamicImage) -> Result<String, UploadError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(frame.to_rgb8()).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

pub fn train_image_request(frame: &DynamicImage, label: &str) -> Result<TrainImageRequest, UploadError> {
    Ok(TrainImageRequest {
        image_data: TrainImage {
            data: encode_frame(frame)?,
            class: label.to_string(),
        },
    })
}
