use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use crate::photo::Image;
use std::path::PathBuf;
use std::sync::Arc;

/// Treats a photo on disk as the camera's output.
pub struct DeviceCameraFile {
    logger: Arc<dyn Logger + Send + Sync>,
    path: PathBuf,
}

impl DeviceCameraFile {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, path: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("file"),
            path,
        }
    }
}

impl DeviceCamera for DeviceCameraFile {
    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn capture_photo(&self) -> Result<Image, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Reading photo from {}", self.path.display()))?;
        let image = Image::open(&self.path)?;
        self.logger.info(&format!(
            "Photo is {}x{}, {:?}",
            image.width(),
            image.height(),
            image.orientation()
        ))?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::photo::Orientation;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
        ))
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let camera = DeviceCameraFile::new(logger(), PathBuf::from("/definitely/not/here.png"));
        assert!(!camera.is_available());
        assert!(camera.capture_photo().is_err());
    }

    #[test]
    fn test_reads_png_from_disk() {
        let path = std::env::temp_dir().join(format!("photo-classify-{}.png", std::process::id()));
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(6, 3, Rgb([1u8, 2, 3])))
            .save(&path)
            .unwrap();

        let camera = DeviceCameraFile::new(logger(), path.clone());
        assert!(camera.is_available());
        let photo = camera.capture_photo().unwrap();
        assert_eq!((photo.width(), photo.height()), (6, 3));
        assert_eq!(photo.orientation(), Orientation::Up);

        std::fs::remove_file(path).unwrap();
    }
}
