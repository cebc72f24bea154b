pub mod session;

use crate::error::{ClassificationError, PipelineError};
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_preprocessor::{crop_and_resize, TargetSize};
use crate::library::logger::interface::Logger;
use crate::photo::Image;
use session::ClassificationSession;
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    pub preprocessed: Image,
    /// Received results at or above the display threshold, in received order.
    pub results: Vec<Classification>,
    /// Everything the classifier returned, in received order.
    pub original: Vec<Classification>,
}

#[derive(Clone)]
pub struct ClassificationPipeline {
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
    target_size: TargetSize,
    local_threshold: f32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassificationPipeline {
    pub fn new(
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        target_size: TargetSize,
        local_threshold: f32,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            classifier,
            target_size,
            local_threshold,
            logger: logger.with_namespace("pipeline"),
        }
    }

    /// Preprocess and classify one photo.
    pub fn run(&self, image: Image) -> Result<ClassificationOutcome, PipelineError> {
        let result = self.run_inner(image);

        if let Err(e) = &result {
            let _ = self.logger.error(&format!("Classification failed: {}", e));
        }

        result
    }

    fn run_inner(&self, image: Image) -> Result<ClassificationOutcome, PipelineError> {
        let _ = self.logger.info(&format!(
            "Preprocessing {}x{} photo ({:?}, scale {}) to {}x{}",
            image.width(),
            image.height(),
            image.orientation(),
            image.scale(),
            self.target_size.width,
            self.target_size.height
        ));

        let preprocessed = crop_and_resize(image, self.target_size)?;

        let original = self.classifier.classify(&preprocessed)?;

        if original.is_empty() {
            return Err(ClassificationError::NoResult.into());
        }

        if let Some(bad) = original
            .iter()
            .find(|c| !c.confidence.is_finite() || !(0.0..=1.0).contains(&c.confidence))
        {
            return Err(ClassificationError::ServiceFailure(format!(
                "confidence {} for {:?} is outside [0, 1]",
                bad.confidence, bad.label
            ))
            .into());
        }

        let results: Vec<Classification> = original
            .iter()
            .filter(|c| c.confidence >= self.local_threshold)
            .cloned()
            .collect();

        if results.is_empty() {
            return Err(ClassificationError::NoResult.into());
        }

        let _ = self.logger.info(&format!(
            "Received {} results, displaying {}",
            original.len(),
            results.len()
        ));

        Ok(ClassificationOutcome {
            preprocessed,
            results,
            original,
        })
    }

    /// Classify `image` and record the outcome in `session`, replacing
    /// whatever the session held. On failure the session is left untouched.
    pub fn classify<'s>(
        &self,
        session: &'s mut ClassificationSession,
        image: Image,
    ) -> Result<&'s [Classification], PipelineError> {
        let outcome = self.run(image)?;
        session.record(outcome);
        Ok(session.results())
    }

    /// Classify `image` into `session` on a worker thread. `on_done` runs on
    /// that thread and receives the session back, updated on success.
    pub fn classify_in_background<F>(
        &self,
        session: ClassificationSession,
        image: Image,
        on_done: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<ClassificationSession, PipelineError>) + Send + 'static,
    {
        let pipeline = self.clone();
        std::thread::spawn(move || {
            let mut session = session;
            let result = pipeline.classify(&mut session, image).map(|results| results.len());
            on_done(result.map(|_| session))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreprocessError;
    use crate::image_classifier::impl_scripted::ImageClassifierScripted;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::DynamicImage;
    use std::sync::mpsc::channel;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
        ))
    }

    fn pipeline(classifier: Arc<ImageClassifierScripted>, threshold: f32) -> ClassificationPipeline {
        ClassificationPipeline::new(classifier, TargetSize::default(), threshold, logger())
    }

    fn photo(width: u32, height: u32) -> Image {
        Image::new(DynamicImage::new_rgb8(width, height))
    }

    #[test]
    fn test_classify_keeps_received_order_and_caches_original() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![
            ("cat", 0.9),
            ("dog", 0.5),
        ]));
        let pipeline = pipeline(classifier.clone(), 0.0);
        let mut session = ClassificationSession::new();

        let results = pipeline.classify(&mut session, photo(1000, 2000)).unwrap();

        let expected = vec![Classification::new("cat", 0.9), Classification::new("dog", 0.5)];
        assert_eq!(results, expected.as_slice());
        assert_eq!(session.original(), expected.as_slice());
        assert_eq!(classifier.seen_sizes(), vec![(224, 224)]);

        let preprocessed = session.preprocessed().unwrap();
        assert_eq!((preprocessed.width(), preprocessed.height()), (224, 224));
    }

    #[test]
    fn test_classify_does_not_reorder_unsorted_response() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![
            ("dog", 0.2),
            ("cat", 0.7),
        ]));
        let mut session = ClassificationSession::new();

        let results = pipeline(classifier, 0.0)
            .classify(&mut session, photo(10, 10))
            .unwrap();

        assert_eq!(results[0].label, "dog");
        assert_eq!(results[1].label, "cat");
    }

    #[test]
    fn test_classify_overwrites_previous_original() {
        let mut session = ClassificationSession::new();

        let first = Arc::new(ImageClassifierScripted::returning(vec![
            ("cat", 0.9),
            ("dog", 0.5),
        ]));
        pipeline(first, 0.0)
            .classify(&mut session, photo(50, 50))
            .unwrap();

        let second = Arc::new(ImageClassifierScripted::returning(vec![("bird", 0.4)]));
        pipeline(second, 0.0)
            .classify(&mut session, photo(50, 50))
            .unwrap();

        assert_eq!(session.original(), &[Classification::new("bird", 0.4)]);
        assert_eq!(session.results(), &[Classification::new("bird", 0.4)]);
    }

    #[test]
    fn test_classify_empty_response_is_no_result() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![]));
        let mut session = ClassificationSession::new();

        let error = pipeline(classifier, 0.0)
            .classify(&mut session, photo(20, 30))
            .unwrap_err();

        assert_eq!(error, PipelineError::Classification(ClassificationError::NoResult));
        assert!(session.original().is_empty());
        assert!(session.preprocessed().is_none());
    }

    #[test]
    fn test_classify_service_failure_is_surfaced() {
        let classifier = Arc::new(ImageClassifierScripted::failing(
            ClassificationError::ServiceFailure("model crashed".to_string()),
        ));
        let mut session = ClassificationSession::new();

        let error = pipeline(classifier, 0.0)
            .classify(&mut session, photo(20, 30))
            .unwrap_err();

        assert_eq!(
            error,
            PipelineError::Classification(ClassificationError::ServiceFailure(
                "model crashed".to_string()
            ))
        );
    }

    #[test]
    fn test_classify_failure_keeps_previous_session() {
        let mut session = ClassificationSession::new();
        let ok = Arc::new(ImageClassifierScripted::returning(vec![("cat", 0.9)]));
        pipeline(ok, 0.0).classify(&mut session, photo(8, 8)).unwrap();

        let empty = Arc::new(ImageClassifierScripted::returning(vec![]));
        assert!(pipeline(empty, 0.0)
            .classify(&mut session, photo(8, 8))
            .is_err());

        assert_eq!(session.original(), &[Classification::new("cat", 0.9)]);
    }

    #[test]
    fn test_classify_rejects_out_of_range_confidence() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![("cat", 1.5)]));

        let error = pipeline(classifier, 0.0).run(photo(8, 8)).unwrap_err();

        assert!(matches!(
            error,
            PipelineError::Classification(ClassificationError::ServiceFailure(_))
        ));
    }

    #[test]
    fn test_classify_zero_sized_photo_never_reaches_classifier() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![("cat", 0.9)]));

        let error = pipeline(classifier.clone(), 0.0)
            .run(photo(0, 100))
            .unwrap_err();

        assert_eq!(
            error,
            PipelineError::Preprocess(PreprocessError::CropFailed {
                width: 0,
                height: 100
            })
        );
        assert!(classifier.seen_sizes().is_empty());
    }

    #[test]
    fn test_threshold_filters_displayed_but_not_original() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![
            ("cat", 0.9),
            ("dog", 0.5),
            ("bird", 0.1),
        ]));

        let outcome = pipeline(classifier, 0.5).run(photo(64, 32)).unwrap();

        assert_eq!(
            outcome.results,
            vec![Classification::new("cat", 0.9), Classification::new("dog", 0.5)]
        );
        assert_eq!(outcome.original.len(), 3);
    }

    #[test]
    fn test_threshold_removing_everything_is_no_result() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![("cat", 0.2)]));

        let error = pipeline(classifier, 0.5).run(photo(64, 32)).unwrap_err();

        assert_eq!(error, PipelineError::Classification(ClassificationError::NoResult));
    }

    #[test]
    fn test_classify_in_background_returns_updated_session() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![("cat", 0.9)]));
        let (tx, rx) = channel();

        pipeline(classifier, 0.0)
            .classify_in_background(ClassificationSession::new(), photo(300, 200), move |result| {
                tx.send(result).unwrap();
            })
            .join()
            .unwrap();

        let session = rx.recv().unwrap().unwrap();
        assert_eq!(session.results(), &[Classification::new("cat", 0.9)]);
        assert_eq!(session.original(), &[Classification::new("cat", 0.9)]);
    }

    #[test]
    fn test_classify_in_background_overwrites_given_session() {
        let mut previous = ClassificationSession::new();
        let first = Arc::new(ImageClassifierScripted::returning(vec![("dog", 0.7)]));
        pipeline(first, 0.0)
            .classify(&mut previous, photo(40, 40))
            .unwrap();

        let second = Arc::new(ImageClassifierScripted::returning(vec![("bird", 0.6)]));
        let (tx, rx) = channel();
        pipeline(second, 0.0)
            .classify_in_background(previous, photo(40, 40), move |result| {
                tx.send(result).unwrap();
            })
            .join()
            .unwrap();

        let session = rx.recv().unwrap().unwrap();
        assert_eq!(session.original(), &[Classification::new("bird", 0.6)]);
    }

    #[test]
    fn test_classify_in_background_reports_failure() {
        let classifier = Arc::new(ImageClassifierScripted::returning(vec![]));
        let (tx, rx) = channel();

        pipeline(classifier, 0.0)
            .classify_in_background(ClassificationSession::new(), photo(30, 30), move |result| {
                tx.send(result).unwrap();
            })
            .join()
            .unwrap();

        assert_eq!(
            rx.recv().unwrap().unwrap_err(),
            PipelineError::Classification(ClassificationError::NoResult)
        );
    }
}
