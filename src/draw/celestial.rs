//! Crescent moon and hanging lantern illustrations.

use super::color::{Color, Palette, WHITE};
use super::shadow::{Shadow, with_shadow};
use cairo::{Context, LinearGradient, Operator};
use std::f64::consts::{PI, TAU};

/// Blur of the moon's external glow.
pub const MOON_GLOW_BLUR: f64 = 40.0;

/// Blur of the light inside a lantern body.
pub const LANTERN_GLOW_BLUR: f64 = 20.0;

/// Geometry of the circle erased from the moon disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crescent {
    pub offset_x: f64,
    pub offset_y: f64,
    pub erase_radius: f64,
}

/// Erase-circle placement for a moon of `radius`.
pub fn crescent(radius: f64) -> Crescent {
    Crescent {
        offset_x: -0.35 * radius,
        offset_y: -0.20 * radius,
        erase_radius: 0.85 * radius,
    }
}

/// Area of a circle of `a` intersected with one of `b`, centres `d` apart.
fn lens_area(a: f64, b: f64, d: f64) -> f64 {
    if d >= a + b {
        return 0.0;
    }
    if d <= (a - b).abs() {
        let r = a.min(b);
        return PI * r * r;
    }
    let alpha = ((d * d + a * a - b * b) / (2.0 * d * a)).clamp(-1.0, 1.0).acos();
    let beta = ((d * d + b * b - a * a) / (2.0 * d * b)).clamp(-1.0, 1.0).acos();
    a * a * (alpha - alpha.sin() * alpha.cos()) + b * b * (beta - beta.sin() * beta.cos())
}

/// Area left visible after erasing the crescent circle from the disc.
pub fn crescent_area(radius: f64) -> f64 {
    let c = crescent(radius);
    let distance = c.offset_x.hypot(c.offset_y);
    PI * radius * radius - lens_area(radius, c.erase_radius, distance)
}

/// Paints a glowing crescent moon centred at `(cx, cy)`.
///
/// The disc and the erase circle are composited inside an isolated group,
/// so `DestOut` only removes moon pixels and never the layers below.
pub fn paint_moon(ctx: &Context, cx: f64, cy: f64, radius: f64, palette: &Palette) -> Result<(), cairo::Error> {
    if radius <= 0.0 {
        return Ok(());
    }
    let glow = Shadow::glow(palette.primary_gold, MOON_GLOW_BLUR);
    let shape = crescent(radius);

    ctx.save()?;
    let result = with_shadow(ctx, Some(&glow), |c| {
        c.push_group();

        let gradient = LinearGradient::new(cx - radius, cy - radius, cx + radius, cy + radius);
        Color::from_rgb8(0xFF, 0xF5, 0xC3).add_stop(&gradient, 0.0);
        Color::from_rgb8(0xFD, 0xB9, 0x31).add_stop(&gradient, 0.5);
        Color::from_rgb8(0x99, 0x65, 0x15).add_stop(&gradient, 1.0);
        c.set_source(&gradient)?;
        c.new_path();
        c.arc(cx, cy, radius, 0.0, TAU);
        c.fill()?;

        c.set_operator(Operator::DestOut);
        c.set_source_rgba(0.0, 0.0, 0.0, 1.0);
        c.arc(
            cx + shape.offset_x,
            cy + shape.offset_y,
            shape.erase_radius,
            0.0,
            TAU,
        );
        c.fill()?;
        c.set_operator(Operator::Over);

        c.pop_group_to_source()?;
        c.paint()
    });
    ctx.restore()?;
    result
}

/// Where and how large a lantern hangs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanternPlacement {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl LanternPlacement {
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }
}

/// Paints one lantern hanging from its anchor.
///
/// All geometry is in the lantern's own unscaled space; the placement is
/// applied as a single translate + uniform scale.
pub fn paint_lantern(ctx: &Context, placement: &LanternPlacement, palette: &Palette) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.translate(placement.x, placement.y);
    ctx.scale(placement.scale, placement.scale);
    let result = draw_lantern(ctx, palette);
    ctx.restore()?;
    result
}

fn draw_lantern(ctx: &Context, palette: &Palette) -> Result<(), cairo::Error> {
    // String
    ctx.new_path();
    ctx.move_to(0.0, -300.0);
    ctx.line_to(0.0, 0.0);
    palette.secondary_gold.apply(ctx);
    ctx.set_line_width(3.0);
    ctx.stroke()?;

    // Top ring
    ctx.arc(0.0, 0.0, 8.0, 0.0, TAU);
    palette.primary_gold.apply(ctx);
    ctx.fill()?;

    // Dome
    ctx.move_to(-15.0, 5.0);
    quad_to(ctx, (-15.0, 5.0), (0.0, -25.0), (15.0, 5.0));
    ctx.line_to(20.0, 15.0);
    ctx.line_to(-20.0, 15.0);
    ctx.close_path();
    palette.primary_gold.apply(ctx);
    ctx.fill()?;

    // Glass body
    ctx.move_to(-20.0, 15.0);
    ctx.line_to(-25.0, 50.0);
    ctx.line_to(-10.0, 90.0);
    ctx.line_to(10.0, 90.0);
    ctx.line_to(25.0, 50.0);
    ctx.line_to(20.0, 15.0);
    ctx.close_path();

    let glass = LinearGradient::new(-20.0, 15.0, 20.0, 90.0);
    Color::rgba8(255, 215, 0, 0.8).add_stop(&glass, 0.0);
    Color::rgba8(255, 165, 0, 0.6).add_stop(&glass, 0.5);
    Color::rgba8(255, 69, 0, 0.8).add_stop(&glass, 1.0);
    ctx.set_source(&glass)?;
    ctx.fill_preserve()?;
    palette.primary_gold.apply(ctx);
    ctx.set_line_width(2.0);
    ctx.stroke()?;

    // Inner glow
    let glow = Shadow::glow(Color::from_rgb8(0xFF, 0xD7, 0x00), LANTERN_GLOW_BLUR);
    with_shadow(ctx, Some(&glow), |c| {
        c.new_path();
        c.arc(0.0, 50.0, 10.0, 0.0, TAU);
        WHITE.apply(c);
        c.fill()
    })?;

    // Base cap
    ctx.move_to(-10.0, 90.0);
    ctx.line_to(-5.0, 105.0);
    ctx.line_to(5.0, 105.0);
    ctx.line_to(10.0, 90.0);
    ctx.close_path();
    palette.primary_gold.apply(ctx);
    ctx.fill()?;

    // Tassel
    ctx.move_to(0.0, 105.0);
    ctx.line_to(0.0, 120.0);
    palette.secondary_gold.apply(ctx);
    ctx.stroke()
}

/// Appends a quadratic Bézier from `start` through control `q` to `end`.
fn quad_to(ctx: &Context, start: (f64, f64), q: (f64, f64), end: (f64, f64)) {
    let c1 = (
        start.0 + 2.0 / 3.0 * (q.0 - start.0),
        start.1 + 2.0 / 3.0 * (q.1 - start.1),
    );
    let c2 = (
        end.0 + 2.0 / 3.0 * (q.0 - end.0),
        end.1 + 2.0 / 3.0 * (q.1 - end.1),
    );
    ctx.curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
}
