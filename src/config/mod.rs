//! Configuration file support for lanternpost.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/lanternpost/config.toml`. Settings include card geometry, the
//! color palette, fonts, the fixed card copy and the export/share captions.
//!
//! If no config file exists, the built-in card design is used unchanged.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{
    CanvasConfig, ExportConfig, FontConfig, NameFitConfig, PaletteConfig, ShareConfig, TextConfig,
};

use crate::draw::Palette;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have defaults matching the stock card and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// device_scale = 2.0
///
/// [palette]
/// primary_gold = "#FFD700"
/// accent_orange = [251, 133, 0]
///
/// [fonts]
/// display_family = "Amiri"
/// timeout_ms = 1500
///
/// [export]
/// output_dir = "~/Pictures"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Card size, margin and device scale
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Semantic colors
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Font families and readiness timeout
    #[serde(default)]
    pub fonts: FontConfig,

    /// Fixed greeting and branding copy
    #[serde(default)]
    pub text: TextConfig,

    /// Name line auto-fit bounds
    #[serde(default)]
    pub name_fit: NameFitConfig,

    /// Download location and file naming
    #[serde(default)]
    pub export: ExportConfig,

    /// Share captions and fallback link
    #[serde(default)]
    pub share: ShareConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 200 - 4096
    /// - `canvas.margin`: 0 - 200
    /// - `canvas.device_scale`: greater than 0, at most 2.0
    /// - `fonts.timeout_ms`: 0 - 10000
    /// - `name_fit`: 1 <= `min_size` <= `max_size`
    pub fn validate_and_clamp(&mut self) {
        // Width: 200 - 4096
        if !(200.0..=4096.0).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {:.1}, clamping to 200-4096 range",
                self.canvas.width
            );
            self.canvas.width = clamp_or(self.canvas.width, 200.0, 4096.0, 1080.0);
        }

        // Height: 200 - 4096
        if !(200.0..=4096.0).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {:.1}, clamping to 200-4096 range",
                self.canvas.height
            );
            self.canvas.height = clamp_or(self.canvas.height, 200.0, 4096.0, 1920.0);
        }

        // Margin: 0 - 200
        if !(0.0..=200.0).contains(&self.canvas.margin) {
            log::warn!(
                "Invalid canvas margin {:.1}, clamping to 0-200 range",
                self.canvas.margin
            );
            self.canvas.margin = clamp_or(self.canvas.margin, 0.0, 200.0, 40.0);
        }

        // Device scale: (0, 2]
        if !(self.canvas.device_scale > 0.0 && self.canvas.device_scale <= 2.0) {
            log::warn!(
                "Invalid device_scale {:.2}, using a value in the (0, 2] range",
                self.canvas.device_scale
            );
            self.canvas.device_scale = if self.canvas.device_scale > 2.0 {
                2.0
            } else {
                1.0
            };
        }

        // Font timeout: 0 - 10000 ms
        if self.fonts.timeout_ms > 10_000 {
            log::warn!(
                "Invalid font timeout_ms {}, clamping to 0-10000 range",
                self.fonts.timeout_ms
            );
            self.fonts.timeout_ms = 10_000;
        }

        // Name fit bounds
        if !(self.name_fit.min_size >= 1.0) {
            log::warn!(
                "Invalid name_fit min_size {:.1}, using 1.0",
                self.name_fit.min_size
            );
            self.name_fit.min_size = 1.0;
        }
        if !(self.name_fit.max_size >= self.name_fit.min_size) {
            log::warn!(
                "name_fit max_size {:.1} is below min_size {:.1}, raising it",
                self.name_fit.max_size,
                self.name_fit.min_size
            );
            self.name_fit.max_size = self.name_fit.min_size;
        }

        if self.export.filename_prefix.contains(['/', '\\']) {
            log::warn!(
                "Invalid filename_prefix '{}', falling back to 'Ramadan_'",
                self.export.filename_prefix
            );
            self.export.filename_prefix = "Ramadan_".to_string();
        }
    }

    /// Resolves the `[palette]` section into drawable colors.
    ///
    /// Entries that fail to parse keep the stock color.
    pub fn palette(&self) -> Palette {
        let stock = Palette::default();
        let p = &self.palette;
        Palette {
            bg_start: p.bg_start.to_color(stock.bg_start),
            bg_mid: p.bg_mid.to_color(stock.bg_mid),
            bg_end: p.bg_end.to_color(stock.bg_end),
            primary_gold: p.primary_gold.to_color(stock.primary_gold),
            secondary_gold: p.secondary_gold.to_color(stock.secondary_gold),
            accent_red: p.accent_red.to_color(stock.accent_red),
            accent_green: p.accent_green.to_color(stock.accent_green),
            accent_blue: p.accent_blue.to_color(stock.accent_blue),
            accent_orange: p.accent_orange.to_color(stock.accent_orange),
            white: p.white.to_color(stock.white),
            off_white: p.off_white.to_color(stock.off_white),
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/lanternpost/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("lanternpost");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema of the config file, for editor completion.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Clamps finite values into `[min, max]`; NaN becomes `default`.
fn clamp_or(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}
