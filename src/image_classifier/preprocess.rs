use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Largest centered square.
pub fn center_crop_square(image: &DynamicImage) -> DynamicImage {
    let size = image.width().min(image.height());
    let x = (image.width() - size) / 2;
    let y = (image.height() - size) / 2;
    image.crop_imm(x, y, size, size)
}

pub fn resize_square(image: &DynamicImage, size: u32) -> DynamicImage {
    if image.width() == size && image.height() == size {
        return image.clone();
    }
    image.resize_exact(size, size, imageops::FilterType::Triangle)
}

/// NHWC `[1, h, w, 3]` with every channel scaled to `p / 127 - 1`.
pub fn normalize(image: &DynamicImage) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, height, width, 3), |(_, y, x, c)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        pixel[c] as f32 / 127.0 - 1.0
    })
    .into_tensor()
}

pub fn prepare_input(image: &DynamicImage, size: u32) -> Tensor {
    let cropped = center_crop_square(image);
    let resized = resize_square(&cropped, size);
    normalize(&resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_center_crop_landscape() {
        // left and right thirds blue, middle red
        let mut img = ImageBuffer::from_pixel(300, 100, Rgb([0u8, 0, 255]));
        for y in 0..100 {
            for x in 100..200 {
                img.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }

        let cropped = center_crop_square(&DynamicImage::ImageRgb8(img));

        assert_eq!((cropped.width(), cropped.height()), (100, 100));
        assert!(cropped.to_rgb8().pixels().all(|p| *p == Rgb([255, 0, 0])));
    }

    #[test]
    fn test_center_crop_portrait() {
        let cropped = center_crop_square(&solid(48, 64, [1, 2, 3]));

        assert_eq!((cropped.width(), cropped.height()), (48, 48));
    }

    #[test]
    fn test_prepare_input_shape() {
        let tensor = prepare_input(&solid(640, 480, [255, 0, 0]), 224);

        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn test_normalization_scale() {
        let tensor = normalize(&solid(2, 2, [254, 127, 0]));
        let slice = tensor.as_slice::<f32>().unwrap();

        // channels are interleaved per pixel
        assert!((slice[0] - 1.0).abs() < 1e-6);
        assert!(slice[1].abs() < 1e-6);
        assert!((slice[2] + 1.0).abs() < 1e-6);
    }
}
