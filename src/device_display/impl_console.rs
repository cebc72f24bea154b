use crate::device_display::interface::{DeviceDisplay, Screen};
use std::error::Error;

const WIDTH: usize = 40;

pub struct DeviceDisplayConsole {
    last: Option<Screen>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self { last: None }
    }

    fn render_lines(screen: &Screen) -> Vec<String> {
        let mut lines = vec![];

        lines.push(format!("┌{}┐", "─".repeat(WIDTH)));
        lines.push(Self::boxed(&screen.status));

        if let Some(alert) = &screen.alert {
            lines.push(Self::boxed(&format!("! {}", alert)));
        }

        if screen.capture_enabled {
            lines.push(Self::boxed("[c] capture"));
        } else {
            lines.push(Self::boxed("[r] reset"));
        }

        if !screen.rows.is_empty() {
            lines.push(format!("├{}┤", "─".repeat(WIDTH)));
            for (i, row) in screen.rows.iter().enumerate() {
                lines.push(Self::boxed(&format!("{} {} {}", i, row.title, row.detail)));
            }
        }

        lines.push(format!("└{}┘", "─".repeat(WIDTH)));
        lines
    }

    // Pads or truncates to the box width.
    fn boxed(text: &str) -> String {
        let mut line: String = text.chars().take(WIDTH).collect();
        let len = line.chars().count();
        line.push_str(&" ".repeat(WIDTH - len));
        format!("│{}│", line)
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.show(&Screen::default())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.last.as_ref() == Some(screen) {
            return Ok(());
        }

        for line in Self::render_lines(screen) {
            println!("{}", line);
        }

        self.last = Some(screen.clone());
        Ok(())
    }
}
