use crate::results_drawer::{DrawerPosition, ResultRow};
use std::error::Error;

/// Everything the user sees for one state of the app.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    /// One-line status, e.g. "Classifying..."
    pub status: String,
    /// Whether the capture control is offered.
    pub capture_enabled: bool,
    /// Alert shown on top of everything else.
    pub alert: Option<String>,
    pub rows: Vec<ResultRow>,
    pub drawer: DrawerPosition,
    pub drawer_height: f32,
    pub scroll_enabled: bool,
}

pub trait DeviceDisplay: Send + Sync {
    /// Prepare the output surface
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace whatever is shown with `screen`
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>>;
}
