use crate::device_display::interface::{DeviceDisplay, Screen};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Keeps every screen it was asked to show.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    screens: Arc<Mutex<Vec<Screen>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Screen> {
        self.screens.lock().ok()?.last().cloned()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screens
            .lock()
            .map_err(|e| e.to_string())?
            .push(screen.clone());
        Ok(())
    }
}
