use crate::image_classifier::models::model_config::Normalization;
use image::DynamicImage;
use tract_onnx::prelude::*;

/// NCHW f32 tensor of an RGB image, each channel scaled to [0, 1] and then
/// normalised with `normalization`.
pub fn image_to_tensor(image: &DynamicImage, normalization: &Normalization) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let tensor = tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - normalization.mean[c]) / normalization.std[c]
    });

    tensor.into_tensor()
}
