use crate::classification_pipeline::ClassificationOutcome;
use crate::image_classifier::interface::Classification;
use crate::photo::Image;

/// Latest classification of one capture.
///
/// `results` is what gets displayed; `original` is the full sequence the
/// classifier returned. Recording a new outcome replaces both.
#[derive(Debug, Clone, Default)]
pub struct ClassificationSession {
    preprocessed: Option<Image>,
    results: Vec<Classification>,
    original: Vec<Classification>,
}

impl ClassificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: ClassificationOutcome) {
        self.preprocessed = Some(outcome.preprocessed);
        self.results = outcome.results;
        self.original = outcome.original;
    }

    pub fn preprocessed(&self) -> Option<&Image> {
        self.preprocessed.as_ref()
    }

    pub fn results(&self) -> &[Classification] {
        &self.results
    }

    pub fn original(&self) -> &[Classification] {
        &self.original
    }
}
