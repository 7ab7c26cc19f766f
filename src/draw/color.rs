//! RGBA color type and the card's semantic palette.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use lanternpost::draw::Color;
/// let gold = Color::from_hex("#FFD700").unwrap();
/// assert_eq!(gold.r, 1.0);
/// let faded = gold.with_alpha(0.5);
/// assert_eq!(faded.a, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// Creates a color from 8-bit channels and a floating-point alpha.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a,
        }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| {
                    let v = c.to_digit(16).unwrap_or(0) as u8;
                    v * 16 + v
                });
                let (r, g, b) = (it.next()?, it.next()?, it.next()?);
                Some(Self::from_rgb8(r, g, b))
            }
            6 => Some(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Some(Self::rgba8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Sets this color as the solid source of a Cairo context.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }

    /// Adds this color as a stop of a Cairo gradient.
    pub fn add_stop(&self, gradient: &cairo::Gradient, offset: f64) {
        gradient.add_color_stop_rgba(offset, self.r, self.g, self.b, self.a);
    }
}

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// The semantic colors every painter draws with.
///
/// Built once from the `[palette]` config section and never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg_start: Color,
    pub bg_mid: Color,
    pub bg_end: Color,
    pub primary_gold: Color,
    pub secondary_gold: Color,
    pub accent_red: Color,
    pub accent_green: Color,
    pub accent_blue: Color,
    pub accent_orange: Color,
    pub white: Color,
    pub off_white: Color,
}

impl Palette {
    /// Semantic names accepted by [`Palette::get`], in declaration order.
    pub const NAMES: [&'static str; 11] = [
        "bg_start",
        "bg_mid",
        "bg_end",
        "primary_gold",
        "secondary_gold",
        "accent_red",
        "accent_green",
        "accent_blue",
        "accent_orange",
        "white",
        "off_white",
    ];

    /// Looks up a color by its semantic name.
    pub fn get(&self, name: &str) -> Option<Color> {
        let color = match name {
            "bg_start" => self.bg_start,
            "bg_mid" => self.bg_mid,
            "bg_end" => self.bg_end,
            "primary_gold" => self.primary_gold,
            "secondary_gold" => self.secondary_gold,
            "accent_red" => self.accent_red,
            "accent_green" => self.accent_green,
            "accent_blue" => self.accent_blue,
            "accent_orange" => self.accent_orange,
            "white" => self.white,
            "off_white" => self.off_white,
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg_start: Color::from_rgb8(0x0f, 0x0c, 0x29),
            bg_mid: Color::from_rgb8(0x30, 0x2b, 0x63),
            bg_end: Color::from_rgb8(0x24, 0x24, 0x3e),
            primary_gold: Color::from_rgb8(0xFF, 0xD7, 0x00),
            secondary_gold: Color::from_rgb8(0xFD, 0xB9, 0x31),
            accent_red: Color::from_rgb8(0xD9, 0x04, 0x29),
            accent_green: Color::from_rgb8(0x00, 0x64, 0x00),
            accent_blue: Color::from_rgb8(0x00, 0x77, 0xB6),
            accent_orange: Color::from_rgb8(0xFB, 0x85, 0x00),
            white: WHITE,
            off_white: Color::from_rgb8(0xF8, 0xF9, 0xFA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#FFD700"), Some(Color::from_rgb8(255, 215, 0)));
        assert_eq!(Color::from_hex("aaa"), Some(Color::from_rgb8(0xaa, 0xaa, 0xaa)));
        let translucent = Color::from_hex("#FFFFFF80").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn palette_lookup_covers_every_name() {
        let palette = Palette::default();
        for name in Palette::NAMES {
            assert!(palette.get(name).is_some(), "missing {name}");
        }
        assert_eq!(palette.get("primary_gold"), Some(palette.primary_gold));
        assert!(palette.get("chartreuse").is_none());
    }
}
