use crate::photo::Image;

pub trait DeviceCamera: Send + Sync {
    /// Whether a capture session could be set up at all.
    fn is_available(&self) -> bool;
    fn capture_photo(&self) -> Result<Image, Box<dyn std::error::Error + Send + Sync>>;
}
