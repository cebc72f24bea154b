use crate::error::ClassificationError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::ranking::{rank, softmax};
use crate::library::logger::interface::Logger;
use crate::photo::Image;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

const LABELS: [&str; 18] = [
    "cat", "dog", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    labels: Vec<String>,
    top_k: usize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, top_k: usize) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
            labels: LABELS.iter().map(|label| label.to_string()).collect(),
            top_k,
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &Image) -> Result<Vec<Classification>, ClassificationError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image...",
            image.width(),
            image.height()
        ));

        let logit_dist = Uniform::new(-4.0f32, 4.0f32)
            .map_err(|e| ClassificationError::ServiceFailure(e.to_string()))?;

        let mut rng = rand::rng();

        let logits: Vec<f32> = self
            .labels
            .iter()
            .map(|_| logit_dist.sample(&mut rng))
            .collect();

        let classifications = rank(&softmax(&logits), &self.labels, self.top_k);

        let _ = self
            .logger
            .debug(&format!("Classifications: {:?}", classifications));

        Ok(classifications)
    }
}
