//! Base gradient and the faint geometric tile texture.

use super::color::Palette;
use cairo::{Context, LinearGradient};
use std::f64::consts::TAU;

/// Side of one pattern cell in logical units.
pub const PATTERN_STEP: f64 = 80.0;

/// Stroke opacity of the pattern.
pub const PATTERN_ALPHA: f64 = 0.03;

/// Fills the whole card with the vertical three-stop background gradient.
pub fn paint_background(
    ctx: &Context,
    width: f64,
    height: f64,
    palette: &Palette,
) -> Result<(), cairo::Error> {
    ctx.save()?;

    let gradient = LinearGradient::new(0.0, 0.0, 0.0, height);
    palette.bg_start.add_stop(&gradient, 0.0);
    palette.bg_mid.add_stop(&gradient, 0.5);
    palette.bg_end.add_stop(&gradient, 1.0);
    ctx.set_source(&gradient)?;
    ctx.rectangle(0.0, 0.0, width, height);
    ctx.fill()?;

    ctx.restore()
}

/// Top-left corners of every pattern cell, row by row.
///
/// Cells start at the origin and keep going while their origin is inside
/// the card; partial cells on the right and bottom edges are clipped by the
/// surface itself.
pub fn pattern_cells(width: f64, height: f64, step: f64) -> Vec<(f64, f64)> {
    if step <= 0.0 {
        return Vec::new();
    }
    let columns = (width / step).ceil() as usize;
    let rows = (height / step).ceil() as usize;

    (0..rows)
        .flat_map(|row| (0..columns).map(move |col| (col as f64 * step, row as f64 * step)))
        .collect()
}

/// Strokes the diamond-and-circle texture over the background.
pub fn paint_pattern(
    ctx: &Context,
    width: f64,
    height: f64,
    palette: &Palette,
) -> Result<(), cairo::Error> {
    let step = PATTERN_STEP;
    let half = step / 2.0;

    ctx.save()?;
    palette.white.with_alpha(PATTERN_ALPHA).apply(ctx);
    ctx.set_line_width(1.0);

    for (x, y) in pattern_cells(width, height, step) {
        ctx.new_path();
        ctx.move_to(x + half, y);
        ctx.line_to(x + step, y + half);
        ctx.line_to(x + half, y + step);
        ctx.line_to(x, y + half);
        ctx.close_path();
        ctx.stroke()?;

        ctx.new_path();
        ctx.arc(x + half, y + half, step / 4.0, 0.0, TAU);
        ctx.stroke()?;
    }

    ctx.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::surface::Surface;

    #[test]
    fn cells_cover_partial_edges() {
        let cells = pattern_cells(1080.0, 1920.0, PATTERN_STEP);
        // 1080 / 80 = 13.5 columns, 1920 / 80 = 24 rows
        assert_eq!(cells.len(), 14 * 24);
        assert_eq!(cells[0], (0.0, 0.0));
        assert_eq!(cells[1], (80.0, 0.0));
        assert_eq!(cells[14], (0.0, 80.0));
        assert!(cells.contains(&(1040.0, 1840.0)));
    }

    #[test]
    fn zero_step_yields_no_cells() {
        assert!(pattern_cells(100.0, 100.0, 0.0).is_empty());
    }

    #[test]
    fn gradient_runs_from_start_to_end_color() {
        let surface = Surface::setup(20.0, 200.0, 1.0).unwrap();
        let palette = Palette::default();
        paint_background(surface.context(), 20.0, 200.0, &palette).unwrap();

        let pixels = surface.pixels().unwrap();
        let row = |y: usize| &pixels[y * 20 * 4..y * 20 * 4 + 4];
        // BGRA byte order; bg_start is #0f0c29, bg_mid is #302b63.
        let top = row(0);
        assert!((top[2] as i32 - 0x0f).abs() <= 2);
        assert!((top[0] as i32 - 0x29).abs() <= 2);
        let middle = row(100);
        assert!((middle[2] as i32 - 0x30).abs() <= 2);
        assert_eq!(top[3], 255);
    }

    #[test]
    fn pattern_leaves_context_state_untouched() {
        let surface = Surface::setup(160.0, 160.0, 1.0).unwrap();
        let ctx = surface.context();
        ctx.set_line_width(7.0);
        paint_pattern(ctx, 160.0, 160.0, &Palette::default()).unwrap();
        assert_eq!(ctx.line_width(), 7.0);
    }
}
