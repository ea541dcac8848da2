//! Desktop application exporting invoice line items from PDF to Excel.

mod app;
mod preview;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use eframe::egui;
use tracing::{info, Level};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::FmtSubscriber;

use pdfscrape_core::{ScraperConfig, Session};

use app::PdfScraperApp;

/// Append debug logs to `path` with wall-clock timestamps.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let subscriber = FmtSubscriber::builder()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .with_timer(ChronoLocal::new("%H:%M:%S".to_string()))
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = ScraperConfig::load_or_default(&cwd)
        .map_err(|e| anyhow!("loading configuration: {e}"))?;

    init_logging(&cwd.join(&config.ui.log_file))?;
    info!("Starting {}", config.ui.title);

    let title = config.ui.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_title(&title),
        centered: true,
        ..Default::default()
    };

    let session = Session::new(config);
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(PdfScraperApp::new(session)))),
    )
    .map_err(|e| anyhow!("window closed with error: {e}"))?;

    info!("Exiting");
    Ok(())
}
