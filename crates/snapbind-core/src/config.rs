// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Settings come from defaults, an optional read-only JSON file, and command
// line overrides. Nothing is ever written back to disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SnapbindError};
use crate::theme::{self, Rgb, Theme};
use crate::types::{DEFAULT_MARGIN_PT, PageGeometry, PaperSize};

/// Export settings for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Paper size for every composed page.
    pub paper_size: PaperSize,
    /// Margin on each side of the page, in points.
    pub margin_pt: f32,
    /// Title embedded in the PDF metadata.
    pub document_title: String,
    /// File name used for the PDF download.
    pub pdf_file_name: String,
    /// File name used for the archive download.
    pub archive_file_name: String,
    /// File name used when the base64 text is saved instead of printed.
    pub base64_file_name: String,
    pub appearance: AppearanceConfig,
    pub logging: LoggingConfig,
}

/// Background theme, used to decide the text tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub theme: Theme,
    /// Background colour as `#rrggbb` or `#rgb`; only read for the plain theme.
    pub background: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "snapbind_document=debug,warn").
    pub level: String,
    /// Emit structured JSON logs instead of human-readable lines.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin_pt: DEFAULT_MARGIN_PT,
            document_title: "Snapbind".into(),
            pdf_file_name: "snapbind-retro.pdf".into(),
            archive_file_name: "snapbind-images.zip".into(),
            base64_file_name: "snapbind.b64.txt".into(),
            appearance: AppearanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Plain,
            background: "#f8fafc".into(),
        }
    }
}

impl AppearanceConfig {
    pub fn background_rgb(&self) -> Result<Rgb> {
        Rgb::from_hex(&self.background).ok_or_else(|| {
            SnapbindError::Config(format!(
                "background '{}' is not a #rrggbb or #rgb colour",
                self.background
            ))
        })
    }

    /// Whether text over this background should be light.
    pub fn prefers_light_text(&self) -> Result<bool> {
        Ok(theme::prefers_light_text(self.theme, self.background_rgb()?))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Config loaded");
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that leave no room to place an image.
    pub fn validate(&self) -> Result<()> {
        if !self.margin_pt.is_finite() || self.margin_pt < 0.0 {
            return Err(SnapbindError::Config(format!(
                "margin must be a non-negative number of points, got {}",
                self.margin_pt
            )));
        }
        let page = self.page_geometry();
        if page.printable_width() <= 0.0 || page.printable_height() <= 0.0 {
            return Err(SnapbindError::Config(format!(
                "a {} pt margin leaves no printable area on a {:.1} x {:.1} pt page",
                self.margin_pt, page.width, page.height
            )));
        }
        self.appearance.background_rgb()?;
        Ok(())
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::for_paper(self.paper_size, self.margin_pt)
    }
}
