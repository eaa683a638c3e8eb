//! Application settings: one immutable value handed to every component.
//!
//! Settings are persisted as pretty-printed JSON. Every field has a default,
//! so older or partial files still load.

use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color_scheme::{
    fallback_color, parse_color_or, with_alpha, Theme, DEFAULT_BAND_ALPHA,
};
use crate::data::layout::{LayoutParams, Margins};
use crate::data::x_formatter::TimeFormat;
use crate::error::ConfigError;

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub font_size: f32,
    /// Time axis shows `HH:MM:SS` instead of `YYYY-MM-DD HH:MM`.
    pub show_time_only: bool,
    /// Draw a vertical rule at every sample timestamp.
    pub show_vertical_lines: bool,
    /// Pin the percent axis to `[0, 100]`.
    pub lock_percent_scale: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_size: 14.0,
            show_time_only: true,
            show_vertical_lines: false,
            lock_percent_scale: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Flags
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSettings {
    pub flag_color: String,
    pub flag_alpha: f32,
    pub flag_bg_color: String,
    pub flag_bg_alpha: f32,
    /// Height of one flag row in screen pixels.
    pub flag_height_px: f64,
    pub show_flag_background: bool,
    /// Flag row labels in bold.
    pub legend_bold: bool,
}

impl Default for FlagSettings {
    fn default() -> Self {
        Self {
            flag_color: "#9b0000".to_string(),
            flag_alpha: 0.8,
            flag_bg_color: "green".to_string(),
            flag_bg_alpha: 0.2,
            flag_height_px: 24.0,
            show_flag_background: true,
            legend_bold: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Processes (state bands)
// ─────────────────────────────────────────────────────────────────────────────

/// Fill color of one state band slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandStyle {
    pub color: String,
    pub alpha: f32,
}

impl BandStyle {
    pub fn new(color: &str, alpha: f32) -> Self {
        Self {
            color: color.to_string(),
            alpha,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessSettings {
    /// Label each state band at its first active sample.
    pub show_processes_labels: bool,
    /// Palette indexed by the band's position in the selection.
    pub bands: Vec<BandStyle>,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            show_processes_labels: false,
            bands: ["green", "red", "blue", "yellow", "cyan"]
                .into_iter()
                .map(|c| BandStyle::new(c, 0.2))
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level settings.
///
/// | Field       | Purpose |
/// |-------------|---------|
/// | `display`   | Theme, font and display toggles |
/// | `flags`     | Flag row colors and height |
/// | `processes` | State band palette and labels |
/// | `margins`   | Window margins around the plot stack |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlotConfig {
    pub display: DisplaySettings,
    pub flags: FlagSettings,
    pub processes: ProcessSettings,
    pub margins: Margins,
}

impl PlotConfig {
    /// Read settings from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write settings to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Read settings, writing defaults when the file does not exist and
    /// falling back to defaults when it cannot be parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            let cfg = Self::default();
            match cfg.save(path) {
                Ok(()) => log::info!("wrote default settings to {}", path.display()),
                Err(e) => log::warn!("could not write default settings: {e}"),
            }
            return cfg;
        }
        match Self::load(path) {
            Ok(cfg) => {
                log::info!("loaded settings from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("ignoring settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn time_format(&self) -> TimeFormat {
        TimeFormat::from_time_only(self.display.show_time_only)
    }

    pub fn layout_params(&self, screen_height_px: f64, flag_count: usize) -> LayoutParams {
        LayoutParams {
            screen_height_px,
            flag_height_px: self.flags.flag_height_px,
            flag_count,
            margins: self.margins,
        }
    }

    /// Fill color of flag rows.
    pub fn flag_fill(&self) -> Color32 {
        with_alpha(
            parse_color_or(&self.flags.flag_color, Color32::DARK_RED),
            self.flags.flag_alpha,
        )
    }

    /// Background color of flag rows.
    pub fn flag_background(&self) -> Color32 {
        with_alpha(
            parse_color_or(&self.flags.flag_bg_color, Color32::DARK_GREEN),
            self.flags.flag_bg_alpha,
        )
    }

    /// Fill color of the state band at `index`. Indices past the palette
    /// cycle through the fallback colors with [`DEFAULT_BAND_ALPHA`].
    pub fn band_fill(&self, index: usize) -> Color32 {
        match self.processes.bands.get(index) {
            Some(style) => with_alpha(
                parse_color_or(&style.color, fallback_color(index)),
                style.alpha,
            ),
            None => with_alpha(fallback_color(index), DEFAULT_BAND_ALPHA),
        }
    }
}
