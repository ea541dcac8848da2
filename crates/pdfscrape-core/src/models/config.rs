//! Configuration structures for the scraper.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScrapeError};

/// File name looked up in the working directory at start-up.
pub const DEFAULT_CONFIG_FILE: &str = "pdf-scraper.json";

/// Main configuration for the pdfscrape application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Table detection configuration.
    pub pdf: TableSettings,

    /// Spreadsheet output configuration.
    pub export: ExportConfig,

    /// Window and logging configuration.
    pub ui: UiConfig,
}

/// Table finder tolerances, in PDF points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Rulings closer than this on their fixed axis are snapped together.
    pub snap_tolerance: f64,

    /// Collinear rulings separated by at most this gap are joined.
    pub join_tolerance: f64,

    /// Slack when testing whether two rulings cross.
    pub intersection_tolerance: f64,

    /// Slack when grouping characters into words inside a cell.
    pub text_tolerance: f64,

    /// Rulings shorter than this are ignored.
    pub edge_min_length: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            snap_tolerance: 3.0,
            join_tolerance: 3.0,
            intersection_tolerance: 3.0,
            text_tolerance: 3.0,
            edge_min_length: 3.0,
        }
    }
}

/// Spreadsheet output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the single worksheet.
    pub sheet_name: String,

    /// Render the header row in bold.
    pub bold_header: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            bold_header: true,
        }
    }
}

/// Window and logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Window title.
    pub title: String,

    /// Initial window width in logical pixels.
    pub window_width: f32,

    /// Initial window height in logical pixels.
    pub window_height: f32,

    /// The centred window is moved up by this many pixels.
    pub vertical_offset: f32,

    /// Debug log written relative to the working directory.
    pub log_file: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "PDF Scraper".to_string(),
            window_width: 660.0,
            window_height: 640.0,
            vertical_offset: 100.0,
            log_file: PathBuf::from("pdf-scraper-log.txt"),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ScrapeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `pdf-scraper.json` from `dir` if it exists, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ScrapeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
