use crate::error::ClassificationError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::photo::Image;
use std::sync::Mutex;

/// Returns a fixed response and remembers the size of every image it saw.
pub struct ImageClassifierScripted {
    response: Result<Vec<Classification>, ClassificationError>,
    seen_sizes: Mutex<Vec<(u32, u32)>>,
}

impl ImageClassifierScripted {
    pub fn returning(results: Vec<(&str, f32)>) -> Self {
        Self {
            response: Ok(results
                .into_iter()
                .map(|(label, confidence)| Classification::new(label, confidence))
                .collect()),
            seen_sizes: Mutex::new(vec![]),
        }
    }

    pub fn failing(error: ClassificationError) -> Self {
        Self {
            response: Err(error),
            seen_sizes: Mutex::new(vec![]),
        }
    }

    pub fn seen_sizes(&self) -> Vec<(u32, u32)> {
        self.seen_sizes.lock().unwrap().clone()
    }
}

impl ImageClassifier for ImageClassifierScripted {
    fn classify(&self, image: &Image) -> Result<Vec<Classification>, ClassificationError> {
        self.seen_sizes
            .lock()
            .unwrap()
            .push((image.width(), image.height()));
        self.response.clone()
    }
}
