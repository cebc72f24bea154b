use chrono::Offset;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_preprocessor::TargetSize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraConfig {
    /// Synthetic photos; `None` picks a random size per capture.
    Fake { size: Option<(u32, u32)> },
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierConfig {
    Fake,
    /// Needs the `backend-tract` feature.
    TractOnnx(ModelConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayConfig {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target_size: TargetSize,
    /// Results below this confidence are not displayed.
    pub local_threshold: f32,
    pub max_displayed_results: usize,
    pub bottom_safe_area: f32,
    pub logger_timezone: chrono::FixedOffset,
    pub logger_debug: bool,
    pub camera: CameraConfig,
    pub classifier: ClassifierConfig,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_size: TargetSize::square(224),
            local_threshold: 0.0,
            max_displayed_results: 5,
            bottom_safe_area: 0.0,
            logger_timezone: utc(),
            logger_debug: false,
            camera: CameraConfig::Fake { size: None },
            classifier: ClassifierConfig::Fake,
            display: DisplayConfig::Console,
        }
    }
}

impl Config {
    /// Overlay `PHOTO_CLASSIFY_*` settings looked up through `get` onto `self`.
    /// Values that fail to parse are ignored, as is a threshold outside [0, 1].
    pub fn with_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = get("PHOTO_CLASSIFY_PHOTO") {
            self.camera = CameraConfig::File {
                path: PathBuf::from(path),
            };
        }

        if let (Some(model), Some(labels)) =
            (get("PHOTO_CLASSIFY_MODEL"), get("PHOTO_CLASSIFY_LABELS"))
        {
            let mut model_config =
                ModelConfig::mobilenet_v2(PathBuf::from(model), PathBuf::from(labels));
            model_config.top_k = self.max_displayed_results;
            self.classifier = ClassifierConfig::TractOnnx(model_config);
        }

        if let Some(display) = get("PHOTO_CLASSIFY_DISPLAY") {
            match display.as_str() {
                "gui" => self.display = DisplayConfig::Gui,
                "console" => self.display = DisplayConfig::Console,
                _ => {}
            }
        }

        if let Some(threshold) = get("PHOTO_CLASSIFY_THRESHOLD")
            .and_then(|t| t.parse::<f32>().ok())
            .filter(|t| (0.0..=1.0).contains(t))
        {
            self.local_threshold = threshold;
        }

        if let Some(debug) = get("PHOTO_CLASSIFY_DEBUG") {
            self.logger_debug = debug == "1" || debug == "true";
        }

        self
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
