use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use crate::photo::Image;
use image::{DynamicImage, ImageBuffer, Rgb};
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    size: Option<(u32, u32)>,
}

impl DeviceCameraFake {
    /// `size` fixes the photo dimensions; `None` picks them at random.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, size: Option<(u32, u32)>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            size,
        }
    }

    fn pick_size(&self) -> Result<(u32, u32), Box<dyn std::error::Error + Send + Sync>> {
        match self.size {
            Some(size) => Ok(size),
            None => {
                let side_dist = Uniform::new_inclusive(240u32, 1920u32)?;
                let mut rng = rand::rng();
                Ok((side_dist.sample(&mut rng), side_dist.sample(&mut rng)))
            }
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn is_available(&self) -> bool {
        true
    }

    fn capture_photo(&self) -> Result<Image, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = self.pick_size()?;
        self.logger
            .info(&format!("Capturing {}x{} photo...", width, height))?;

        // Horizontal gradient so crops are visibly different from the source.
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            Rgb([r, g, 128])
        });

        Ok(Image::new(DynamicImage::ImageRgb8(buffer)))
    }
}
