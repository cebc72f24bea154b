use crate::image_classifier::interface::Classification;

pub const ROW_HEIGHT: f32 = 56.0;
pub const HEADER_HEIGHT: f32 = 33.0;
pub const PARTIAL_REVEAL_MAX_HEIGHT: f32 = 264.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawerPosition {
    #[default]
    Closed,
    Collapsed,
    PartiallyRevealed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub detail: String,
}

/// Receives the raw label of the row a user picked.
pub trait SelectionDelegate: Send + Sync {
    fn on_item_selected(&self, label: &str);
}

/// What the sliding results drawer shows: the ranked labels of the latest
/// capture, capped at `max_rows`, and where the drawer sits.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsDrawer {
    classifications: Vec<Classification>,
    position: DrawerPosition,
    max_rows: usize,
}

impl ResultsDrawer {
    pub fn new(max_rows: usize) -> Self {
        Self {
            classifications: vec![],
            position: DrawerPosition::Closed,
            max_rows,
        }
    }

    pub fn push(&mut self, classifications: Vec<Classification>, position: DrawerPosition) {
        self.classifications = classifications;
        self.position = position;
    }

    pub fn dismiss(&mut self) {
        self.push(vec![], DrawerPosition::Closed);
    }

    pub fn set_position(&mut self, position: DrawerPosition) {
        self.position = position;
    }

    pub fn position(&self) -> DrawerPosition {
        self.position
    }

    pub fn visible(&self) -> &[Classification] {
        let count = self.classifications.len().min(self.max_rows);
        &self.classifications[..count]
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        self.visible()
            .iter()
            .map(|c| ResultRow {
                title: capitalize_words(&c.label),
                detail: format!("{:.2}", c.confidence),
            })
            .collect()
    }

    /// Raw label behind row `index`, if that row is shown.
    pub fn select(&self, index: usize) -> Option<&str> {
        self.visible().get(index).map(|c| c.label.as_str())
    }

    pub fn collapsed_height(&self, bottom_safe_area: f32) -> f32 {
        HEADER_HEIGHT + bottom_safe_area
    }

    pub fn partial_reveal_height(&self, bottom_safe_area: f32) -> f32 {
        let rows = self.visible().len() as f32;
        (ROW_HEIGHT * rows + HEADER_HEIGHT + bottom_safe_area)
            .min(PARTIAL_REVEAL_MAX_HEIGHT + bottom_safe_area)
    }

    /// Height the drawer occupies at its current position.
    pub fn height(&self, bottom_safe_area: f32) -> f32 {
        match self.position {
            DrawerPosition::Closed => 0.0,
            DrawerPosition::Collapsed => self.collapsed_height(bottom_safe_area),
            DrawerPosition::PartiallyRevealed => self.partial_reveal_height(bottom_safe_area),
            DrawerPosition::Open => {
                ROW_HEIGHT * self.visible().len() as f32 + HEADER_HEIGHT + bottom_safe_area
            }
        }
    }

    /// The list only scrolls when the drawer is fully open.
    pub fn is_scroll_enabled(&self) -> bool {
        self.position == DrawerPosition::Open
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
