//! The card renderer: owns the surface and runs the painters in order.

use super::state::{CardName, CardState};
use crate::config::Config;
use crate::draw::border::{TILE_SIZE, paint_border};
use crate::draw::celestial::{LanternPlacement, paint_lantern, paint_moon};
use crate::draw::text::{CardText, NameFit, TextLayer, paint_branding, paint_greeting};
use crate::draw::{FontDescriptor, Palette, Surface, background};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Raster failures. These mean the surface could not be allocated or
/// accessed, not that the input was bad.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

/// Where the crescent sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPlacement {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Everything a render reads. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub device_scale: f64,
    pub palette: Palette,
    pub display_font: FontDescriptor,
    pub branding_font: FontDescriptor,
    pub text: CardText,
    pub name_fit: NameFit,
    pub moon: MoonPlacement,
    pub lanterns: Vec<LanternPlacement>,
    pub font_timeout: Duration,
}

impl RenderConfig {
    /// Resolves a loaded [`Config`] into render inputs.
    ///
    /// Placements are derived from the card width so the moon and the right
    /// lantern stay anchored to the right edge.
    pub fn from_config(config: &Config) -> Self {
        let width = config.canvas.width;
        let fonts = &config.fonts;
        let text = &config.text;

        Self {
            width,
            height: config.canvas.height,
            margin: config.canvas.margin,
            device_scale: config.canvas.device_scale,
            palette: config.palette(),
            display_font: FontDescriptor::new(
                fonts.display_family.as_str(),
                fonts.display_fallback.as_str(),
                "normal",
            ),
            branding_font: FontDescriptor::new(
                fonts.branding_family.as_str(),
                fonts.branding_fallback.as_str(),
                "normal",
            ),
            text: CardText {
                header: text.header.clone(),
                subheader: text.subheader.clone(),
                footer: text.footer.clone(),
                credit: text.credit.clone(),
                support: text.support.clone(),
            },
            name_fit: NameFit {
                min_size: config.name_fit.min_size,
                max_size: config.name_fit.max_size,
            },
            moon: MoonPlacement {
                cx: width - 150.0,
                cy: 200.0,
                radius: 100.0,
            },
            lanterns: vec![
                LanternPlacement::new(200.0, 100.0, 1.8),
                LanternPlacement::new(width - 300.0, 50.0, 1.2),
                LanternPlacement::new(500.0, -20.0, 1.0),
            ],
            font_timeout: Duration::from_millis(fonts.timeout_ms),
        }
    }

    /// Same card at another device pixel ratio.
    pub fn with_device_scale(mut self, device_scale: f64) -> Self {
        self.device_scale = device_scale;
        self
    }

    /// Horizontal room for the name line, inside the side borders and margins.
    pub fn usable_width(&self) -> f64 {
        (self.width - 2.0 * (self.margin + TILE_SIZE)).max(0.0)
    }

    pub fn text_layer(&self) -> TextLayer<'_> {
        TextLayer {
            width: self.width,
            height: self.height,
            usable_width: self.usable_width(),
            palette: &self.palette,
            display_font: &self.display_font,
            branding_font: &self.branding_font,
            text: &self.text,
            name_fit: self.name_fit,
        }
    }

    /// Families the text layers ask for, without duplicates.
    pub fn font_families(&self) -> Vec<String> {
        let mut families = vec![self.display_font.family.clone()];
        if self.branding_font.family != self.display_font.family {
            families.push(self.branding_font.family.clone());
        }
        families
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Owns the card surface and repaints it for a name.
#[derive(Debug)]
pub struct CardRenderer {
    config: Arc<RenderConfig>,
    surface: Surface,
    state: CardState,
}

impl CardRenderer {
    pub fn new(config: Arc<RenderConfig>) -> Result<Self, RenderError> {
        let surface = Surface::setup(config.width, config.height, config.device_scale)?;
        Ok(Self {
            config,
            surface,
            state: CardState::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Name of the card on the surface, if any render has completed.
    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Clears the surface and paints the whole card for `name`.
    ///
    /// Layers are painted in a fixed order: background, pattern, border,
    /// moon, lanterns, greeting, branding. The state only records `name`
    /// once every layer has been painted.
    pub fn render(&mut self, name: &CardName) -> Result<&Surface, RenderError> {
        let config = &self.config;
        self.surface
            .reset(config.width, config.height, config.device_scale)?;
        let ctx = self.surface.context();
        let (width, height) = (config.width, config.height);
        let palette = &config.palette;

        debug!("Painting background");
        background::paint_background(ctx, width, height, palette)?;
        debug!("Painting pattern");
        background::paint_pattern(ctx, width, height, palette)?;
        debug!("Painting border");
        paint_border(ctx, width, height, palette)?;

        debug!("Painting moon");
        let moon = config.moon;
        paint_moon(ctx, moon.cx, moon.cy, moon.radius, palette)?;
        debug!("Painting {} lanterns", config.lanterns.len());
        for placement in &config.lanterns {
            paint_lantern(ctx, placement, palette)?;
        }

        let layer = config.text_layer();
        debug!("Painting greeting");
        paint_greeting(ctx, &layer, name.as_str())?;
        debug!("Painting branding");
        paint_branding(ctx, &layer)?;

        self.surface.image().flush();
        self.state.set(name.clone());

        let (px_w, px_h) = self.surface.pixel_size();
        info!("Rendered card for '{}' ({}x{} px)", name, px_w, px_h);
        Ok(&self.surface)
    }

    /// Copy of the current pixels, premultiplied BGRA rows.
    pub fn pixels(&self) -> Result<Vec<u8>, RenderError> {
        Ok(self.surface.pixels()?)
    }
}
