//! Main window: upload and export buttons above the preview grid.

use std::path::Path;

use eframe::egui;
use rfd::{FileDialog, MessageDialog, MessageLevel};
use tracing::{debug, info, warn};

use pdfscrape_core::{ExportOutcome, ScrapeError, Session};

use crate::preview::Preview;

pub struct PdfScraperApp {
    session: Session,
    preview: Preview,
    status: String,
    placed: bool,
}

impl PdfScraperApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            preview: Preview::default(),
            status: "No PDF uploaded.".to_string(),
            placed: false,
        }
    }

    /// Centre the window on its monitor, lifted by the configured offset.
    /// The monitor size is only known once the window exists.
    fn place_window(&mut self, ctx: &egui::Context) {
        let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else {
            return;
        };
        let ui_config = &self.session.config().ui;
        let window = egui::vec2(ui_config.window_width, ui_config.window_height);
        let position = window_position(monitor, window, ui_config.vertical_offset);

        debug!("Placing window at {:?} on a {:?} monitor", position, monitor);
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(position));
        self.placed = true;
    }

    fn upload(&mut self) {
        let Some(path) = FileDialog::new().add_filter("PDF files", &["pdf"]).pick_file() else {
            return;
        };

        match self.session.upload(path).map(Path::to_path_buf) {
            Ok(selected) => {
                self.preview.clear();
                let message = upload_message(&selected);
                self.status = format!("Selected: {}", selected.display());
                show_dialog(MessageLevel::Info, "Success", &message);
            }
            Err(err) => self.report(&err),
        }
    }

    fn export(&mut self) {
        match self.session.export() {
            Ok(outcome) => {
                let message = export_message(&outcome);
                self.status = format!(
                    "Exported {} rows to {}",
                    outcome.table.len(),
                    outcome.output_path.display()
                );
                self.preview.set_table(outcome.table);
                show_dialog(MessageLevel::Info, "Success", &message);
            }
            Err(err) => {
                self.preview.clear();
                self.report(&err);
            }
        }
    }

    fn report(&mut self, err: &ScrapeError) {
        warn!("{}", err);
        self.status = err.title().to_string();
        show_dialog(MessageLevel::Error, err.title(), &err.user_message());
    }
}

impl eframe::App for PdfScraperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.placed {
            self.place_window(ctx);
        }

        egui::TopBottomPanel::top("actions").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Upload PDF").clicked() {
                    self.upload();
                }
                if ui.button("Export to Excel").clicked() {
                    self.export();
                }
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.show(ui);
        });
    }
}

impl Drop for PdfScraperApp {
    fn drop(&mut self) {
        info!("Window closed");
    }
}

fn show_dialog(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .show();
}

fn window_position(monitor: egui::Vec2, window: egui::Vec2, lift: f32) -> egui::Pos2 {
    let x = (monitor.x - window.x) / 2.0;
    let y = (monitor.y - window.y) / 2.0 - lift;
    egui::pos2(x.max(0.0), y.max(0.0))
}

fn upload_message(path: &Path) -> String {
    format!("Uploaded:\n{}", path.display())
}

fn export_message(outcome: &ExportOutcome) -> String {
    format!(
        "Successfully converted PDF to Excel.\n\nFile location:\n{}",
        outcome.output_path.display()
    )
}
