use classification_pipeline::ClassificationPipeline;
use config::{CameraConfig, ClassifierConfig, Config, DisplayConfig};
use device_camera::{impl_fake::DeviceCameraFake, impl_file::DeviceCameraFile, interface::DeviceCamera};
use device_display::{
    impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui, interface::DeviceDisplay,
};
use image_classifier::{impl_fake::ImageClassifierFake, interface::ImageClassifier};
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use photo_classifier::core::Event;
use photo_classifier::main::PhotoClassifier;
use photo_classifier::selection::SelectionLogger;
use results_drawer::DrawerPosition;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

mod classification_pipeline;
mod config;
mod device_camera;
mod device_display;
mod error;
mod image_classifier;
mod image_preprocessor;
mod library;
mod photo;
mod photo_classifier;
mod results_drawer;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default().with_overrides(|key| std::env::var(key).ok());

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(
        LoggerConsole::new(config.logger_timezone).with_debug(config.logger_debug),
    );

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &config.camera {
        CameraConfig::Fake { size } => Arc::new(DeviceCameraFake::new(logger.clone(), *size)),
        CameraConfig::File { path } => {
            Arc::new(DeviceCameraFile::new(logger.clone(), path.clone()))
        }
    };

    let image_classifier = build_classifier(&config, logger.clone())?;

    let gui = match config.display {
        DisplayConfig::Console => None,
        DisplayConfig::Gui => Some(DeviceDisplayGui::new()),
    };

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match &gui {
        Some(gui) => Arc::new(Mutex::new(gui.clone())),
        None => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
    };
    device_display
        .lock()
        .map_err(|e| e.to_string())?
        .init()?;

    let pipeline = ClassificationPipeline::new(
        image_classifier,
        config.target_size,
        config.local_threshold,
        logger.clone(),
    );

    let photo_classifier = PhotoClassifier::new(
        config,
        logger.clone(),
        device_camera,
        device_display,
        pipeline,
        Arc::new(SelectionLogger::new(logger.clone())),
    );

    let sender = photo_classifier.sender();
    spawn_input(sender.clone(), logger);

    match gui {
        None => photo_classifier.run(),
        // The window needs the main thread, so the event loop moves off it.
        Some(gui) => {
            let app = std::thread::spawn(move || photo_classifier.run());
            gui.run_window()?;
            let _ = sender.send(Event::Quit);
            app.join().map_err(|_| "event loop panicked")?
        }
    }
}

fn build_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
    match &config.classifier {
        ClassifierConfig::Fake => Ok(Arc::new(ImageClassifierFake::new(
            logger,
            config.max_displayed_results,
        ))),
        #[cfg(feature = "backend-tract")]
        ClassifierConfig::TractOnnx(model_config) => Ok(Arc::new(
            image_classifier::impl_tract_onnx::ImageClassifierTractOnnx::new(
                model_config.clone(),
                logger,
            )?,
        )),
        #[cfg(not(feature = "backend-tract"))]
        ClassifierConfig::TractOnnx(_) => {
            Err("ONNX classifier requested but built without the backend-tract feature".into())
        }
    }
}

/// Turn stdin lines into events: `c` capture, `r` reset, a row number
/// selects, `open`/`peek`/`collapse`/`close` move the drawer, `q` quits.
fn spawn_input(sender: Sender<Event>, logger: Arc<dyn Logger + Send + Sync>) {
    let logger = logger.with_namespace("input");

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };

            let event = match parse_command(line.trim()) {
                Some(event) => event,
                None => {
                    let _ = logger.info(&format!("Unknown command {:?}", line.trim()));
                    continue;
                }
            };

            let quit = matches!(event, Event::Quit);
            if sender.send(event).is_err() || quit {
                return;
            }
        }

        let _ = sender.send(Event::Quit);
    });
}

fn parse_command(command: &str) -> Option<Event> {
    match command {
        "c" => Some(Event::CaptureRequested),
        "r" => Some(Event::ResetRequested),
        "q" => Some(Event::Quit),
        "open" => Some(Event::DrawerMoved(DrawerPosition::Open)),
        "peek" => Some(Event::DrawerMoved(DrawerPosition::PartiallyRevealed)),
        "collapse" => Some(Event::DrawerMoved(DrawerPosition::Collapsed)),
        "close" => Some(Event::DrawerMoved(DrawerPosition::Closed)),
        other => other.parse::<usize>().ok().map(Event::ItemSelected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command("c"), Some(Event::CaptureRequested)));
        assert!(matches!(parse_command("r"), Some(Event::ResetRequested)));
        assert!(matches!(parse_command("2"), Some(Event::ItemSelected(2))));
        assert!(matches!(
            parse_command("open"),
            Some(Event::DrawerMoved(DrawerPosition::Open))
        ));
        assert!(parse_command("x").is_none());
        assert!(parse_command("-1").is_none());
    }
}
