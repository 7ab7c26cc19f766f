//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color
/// primary_gold = "#FFD700"
///
/// # Custom RGB color (0-255 per component)
/// accent_orange = [251, 133, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA`
    Hex(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Malformed hex strings fall back to `fallback` with a warning. RGB arrays
    /// are converted from 0-255 range to 0.0-1.0 range with full opacity.
    pub fn to_color(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Hex(hex) => Color::from_hex(hex).unwrap_or_else(|| {
                warn!("Invalid color '{}', using default", hex);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    pub fn hex(value: &str) -> Self {
        ColorSpec::Hex(value.to_string())
    }
}
