use crate::device_display::interface::{DeviceDisplay, Screen};
use crate::results_drawer::DrawerPosition;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct ResultsWindow {
    display: DeviceDisplayGui,
}

impl eframe::App for ResultsWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = match self.display.current() {
            Ok(screen) => screen,
            Err(_) => return,
        };

        if screen.drawer != DrawerPosition::Closed {
            egui::TopBottomPanel::bottom("results_drawer")
                .exact_height(screen.drawer_height)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .enable_scrolling(screen.scroll_enabled)
                        .show(ui, |ui| {
                            for row in &screen.rows {
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new(&row.title).size(18.0));
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| ui.label(egui::RichText::new(&row.detail).monospace()),
                                    );
                                });
                                ui.separator();
                            }
                        });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(&screen.status);

                if let Some(alert) = &screen.alert {
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(alert)
                            .color(egui::Color32::from_rgb(200, 40, 40))
                            .size(16.0),
                    );
                }

                ui.add_space(10.0);
                let hint = if screen.capture_enabled {
                    "Press c + Enter in the terminal to capture"
                } else {
                    "Press r + Enter in the terminal to reset"
                };
                ui.label(egui::RichText::new(hint).weak());
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Shares the latest `Screen` with an egui window. The window itself is
/// driven by `run_window`, which must be called from the main thread.
#[derive(Clone)]
pub struct DeviceDisplayGui {
    screen: Arc<Mutex<Screen>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::default())),
        }
    }

    /// Block until the window is closed.
    pub fn run_window(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([360.0, 640.0]),
            ..Default::default()
        };

        let window = ResultsWindow {
            display: self.clone(),
        };

        eframe::run_native(
            "Photo Classify",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }

    fn current(&self) -> Result<Screen, Box<dyn Error + Send + Sync>> {
        Ok(self.screen.lock().map_err(|e| e.to_string())?.clone())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.show(&Screen::default())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut current = self.screen.lock().map_err(|e| e.to_string())?;
        *current = screen.clone();
        Ok(())
    }
}
