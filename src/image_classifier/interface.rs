use crate::error::ClassificationError;
use crate::photo::Image;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// An opaque image model. Implementations return labels sorted by
/// descending confidence; callers keep that order as-is.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &Image) -> Result<Vec<Classification>, ClassificationError>;
}
