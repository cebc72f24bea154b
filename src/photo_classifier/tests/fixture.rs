use crate::classification_pipeline::ClassificationPipeline;
use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::image_classifier::impl_scripted::ImageClassifierScripted;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::photo_classifier::main::PhotoClassifier;
use crate::results_drawer::SelectionDelegate;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct SelectionRecorder {
    labels: Mutex<Vec<String>>,
}

impl SelectionRecorder {
    pub fn labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }
}

impl SelectionDelegate for SelectionRecorder {
    fn on_item_selected(&self, label: &str) {
        self.labels.lock().unwrap().push(label.to_string());
    }
}

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub classifier: Arc<ImageClassifierScripted>,
    pub device_display: DeviceDisplayFake,
    pub selections: Arc<SelectionRecorder>,
    pub photo_classifier: PhotoClassifier,
}

impl Fixture {
    pub fn new(photo_size: (u32, u32), classifier: ImageClassifierScripted) -> Self {
        let config = Config::default();
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger_timezone));
        let device_camera = Arc::new(DeviceCameraFake::new(logger.clone(), Some(photo_size)));
        let device_display = DeviceDisplayFake::new();
        let classifier = Arc::new(classifier);
        let selections = Arc::new(SelectionRecorder::default());

        let pipeline = ClassificationPipeline::new(
            classifier.clone(),
            config.target_size,
            config.local_threshold,
            logger.clone(),
        );

        let photo_classifier = PhotoClassifier::new(
            config.clone(),
            logger,
            device_camera,
            Arc::new(Mutex::new(device_display.clone())),
            pipeline,
            selections.clone(),
        );

        Self {
            config,
            classifier,
            device_display,
            selections,
            photo_classifier,
        }
    }
}

/// Poll `condition` until it holds or five seconds pass.
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}
