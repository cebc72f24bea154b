use crate::config::Config;
use crate::device_display::interface::{DeviceDisplay, Screen};
use crate::photo_classifier::core::State;
use crate::results_drawer::DrawerPosition;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>, config: Config) -> Self {
        Self {
            device_display,
            config,
        }
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let screen = screen_for(&self.config, state);
        let mut device_display = self.device_display.lock().map_err(|e| e.to_string())?;
        device_display.show(&screen)
    }
}

pub fn screen_for(config: &Config, state: &State) -> Screen {
    match state {
        State::Starting => Screen {
            status: "Starting camera...".to_string(),
            ..Screen::default()
        },
        State::CameraUnavailable => Screen {
            status: "No camera available".to_string(),
            ..Screen::default()
        },
        State::Idle { view, .. } => Screen {
            status: "Ready".to_string(),
            capture_enabled: true,
            rows: view.drawer.rows(),
            drawer: view.drawer.position(),
            drawer_height: view.drawer.height(config.bottom_safe_area),
            ..Screen::default()
        },
        State::Capturing { .. } => Screen {
            status: "Capturing...".to_string(),
            ..Screen::default()
        },
        State::Classifying { photo, .. } => Screen {
            status: format!("Classifying {}x{} photo...", photo.width(), photo.height()),
            ..Screen::default()
        },
        State::Displaying { view, .. } => {
            let rows = view.drawer.rows();
            Screen {
                status: format!(
                    "Showing {} of {} results",
                    rows.len(),
                    view.session.original().len()
                ),
                rows,
                drawer: view.drawer.position(),
                drawer_height: view.drawer.height(config.bottom_safe_area),
                scroll_enabled: view.drawer.is_scroll_enabled(),
                ..Screen::default()
            }
        }
        State::Failed { message, .. } => Screen {
            status: "Classification failed".to_string(),
            alert: Some(message.clone()),
            drawer: DrawerPosition::Closed,
            ..Screen::default()
        },
    }
}
