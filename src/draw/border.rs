//! Decorative border built from two alternating parametric motifs.
//!
//! The border is planned first as a list of [`Motif`] descriptors and then
//! painted, so tile placement and color alternation can be checked without
//! rasterizing anything.

use super::color::{Color, Palette};
use cairo::Context;
use std::f64::consts::TAU;

/// Side of a border tile in logical units.
pub const TILE_SIZE: f64 = 40.0;

/// Which card edge a tile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// The two motif geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifKind {
    /// Triangle with an inset diamond and a dot, used on the top and bottom edges.
    Peak,
    /// Crenellated step polygon with a dot, used on the left and right edges.
    Step,
}

/// One placed border tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motif {
    pub kind: MotifKind,
    pub edge: Edge,
    /// Index of the tile along its edge, starting at the corner.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Main fill, alternating by parity.
    pub primary: Color,
    /// Inset diamond for peaks, dot accent for steps.
    pub secondary: Color,
    /// Peaks: flipped vertically. Steps: flipped horizontally.
    pub mirrored: bool,
}

/// Number of tiles needed to cover `edge_length`.
pub fn tile_count(edge_length: f64, tile: f64) -> usize {
    if edge_length <= 0.0 || tile <= 0.0 {
        0
    } else {
        (edge_length / tile).ceil() as usize
    }
}

/// Lays out every border tile for a `width × height` card.
///
/// Top and bottom run the full width. Left and right run between the corner
/// tiles, so their edge length is `height − 2·tile`. Side parity is taken
/// from the absolute tile slot (`y / tile`), which keeps the left and right
/// columns in phase with the row grid.
pub fn plan_border(width: f64, height: f64, tile: f64, palette: &Palette) -> Vec<Motif> {
    let mut motifs = Vec::new();
    let alternate = |even: bool, a: Color, b: Color| if even { a } else { b };

    for index in 0..tile_count(width, tile) {
        let even = index % 2 == 0;
        motifs.push(Motif {
            kind: MotifKind::Peak,
            edge: Edge::Top,
            index,
            x: index as f64 * tile,
            y: 0.0,
            size: tile,
            primary: alternate(even, palette.accent_red, palette.accent_green),
            secondary: palette.secondary_gold,
            mirrored: false,
        });
    }

    for index in 0..tile_count(width, tile) {
        let even = index % 2 == 0;
        motifs.push(Motif {
            kind: MotifKind::Peak,
            edge: Edge::Bottom,
            index,
            x: index as f64 * tile,
            y: height - tile,
            size: tile,
            primary: alternate(even, palette.accent_green, palette.accent_red),
            secondary: palette.secondary_gold,
            mirrored: true,
        });
    }

    let side_length = height - 2.0 * tile;
    for edge in [Edge::Left, Edge::Right] {
        for index in 0..tile_count(side_length, tile) {
            let slot = index + 1;
            let even = slot % 2 == 0;
            let (a, b) = match edge {
                Edge::Left => (palette.accent_orange, palette.secondary_gold),
                _ => (palette.secondary_gold, palette.accent_orange),
            };
            motifs.push(Motif {
                kind: MotifKind::Step,
                edge,
                index,
                x: if edge == Edge::Left { 0.0 } else { width },
                y: slot as f64 * tile,
                size: tile,
                primary: alternate(even, a, b),
                secondary: palette.primary_gold,
                mirrored: edge == Edge::Right,
            });
        }
    }

    motifs
}

/// Paints the complete border.
pub fn paint_border(ctx: &Context, width: f64, height: f64, palette: &Palette) -> Result<(), cairo::Error> {
    let motifs = plan_border(width, height, TILE_SIZE, palette);
    log::debug!("Painting {} border motifs", motifs.len());
    for motif in &motifs {
        paint_motif(ctx, motif, palette)?;
    }
    Ok(())
}

/// Paints a single motif inside its own save/restore scope.
pub fn paint_motif(ctx: &Context, motif: &Motif, palette: &Palette) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.translate(motif.x, motif.y);
    let result = match motif.kind {
        MotifKind::Peak => {
            if motif.mirrored {
                ctx.scale(1.0, -1.0);
                ctx.translate(0.0, -motif.size);
            }
            draw_peak(ctx, motif.size, motif.primary, motif.secondary, palette.white)
        }
        MotifKind::Step => {
            if motif.mirrored {
                ctx.scale(-1.0, 1.0);
            }
            draw_step(ctx, motif.size, motif.primary, motif.secondary)
        }
    };
    ctx.restore()?;
    result
}

fn draw_peak(ctx: &Context, size: f64, fill: Color, inset: Color, dot: Color) -> Result<(), cairo::Error> {
    ctx.new_path();
    ctx.move_to(0.0, size);
    ctx.line_to(size / 2.0, 0.0);
    ctx.line_to(size, size);
    ctx.close_path();
    fill.apply(ctx);
    ctx.fill()?;

    ctx.move_to(size / 2.0, size * 0.3);
    ctx.line_to(size * 0.7, size * 0.7);
    ctx.line_to(size / 2.0, size * 0.9);
    ctx.line_to(size * 0.3, size * 0.7);
    ctx.close_path();
    inset.apply(ctx);
    ctx.fill()?;

    ctx.arc(size / 2.0, size * 0.15, size * 0.05, 0.0, TAU);
    dot.apply(ctx);
    ctx.fill()
}

fn draw_step(ctx: &Context, size: f64, fill: Color, dot: Color) -> Result<(), cairo::Error> {
    let step = size / 3.0;

    ctx.new_path();
    ctx.move_to(0.0, size);
    ctx.line_to(size, size);
    ctx.line_to(size, size - step);
    ctx.line_to(size - step, size - step);
    ctx.line_to(size - step, size - step * 2.0);
    ctx.line_to(size - step * 2.0, size - step * 2.0);
    ctx.line_to(size - step * 2.0, size - step);
    ctx.line_to(0.0, size - step);
    ctx.close_path();
    fill.apply(ctx);
    ctx.fill()?;

    ctx.arc(size / 2.0, size - step * 1.5, size * 0.08, 0.0, TAU);
    dot.apply(ctx);
    ctx.fill()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::surface::Surface;

    fn edge_tiles(motifs: &[Motif], edge: Edge) -> Vec<Motif> {
        motifs.iter().filter(|m| m.edge == edge).copied().collect()
    }

    #[test]
    fn tile_counts_match_ceil_of_edge_length() {
        let palette = Palette::default();
        for (w, h) in [(1080.0, 1920.0), (1000.0, 1010.0), (410.0, 300.0)] {
            let motifs = plan_border(w, h, TILE_SIZE, &palette);
            let horizontal = tile_count(w, TILE_SIZE);
            let vertical = tile_count(h - 2.0 * TILE_SIZE, TILE_SIZE);
            assert_eq!(horizontal, (w / TILE_SIZE).ceil() as usize);
            assert_eq!(edge_tiles(&motifs, Edge::Top).len(), horizontal);
            assert_eq!(edge_tiles(&motifs, Edge::Bottom).len(), horizontal);
            assert_eq!(edge_tiles(&motifs, Edge::Left).len(), vertical);
            assert_eq!(edge_tiles(&motifs, Edge::Right).len(), vertical);
        }
    }

    #[test]
    fn default_card_has_expected_counts() {
        let motifs = plan_border(1080.0, 1920.0, TILE_SIZE, &Palette::default());
        assert_eq!(edge_tiles(&motifs, Edge::Top).len(), 27);
        assert_eq!(edge_tiles(&motifs, Edge::Left).len(), 46);
        assert_eq!(motifs.len(), 27 * 2 + 46 * 2);
    }

    #[test]
    fn adjacent_tiles_never_share_a_fill() {
        let motifs = plan_border(1080.0, 1920.0, TILE_SIZE, &Palette::default());
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            let tiles = edge_tiles(&motifs, edge);
            for pair in tiles.windows(2) {
                assert_ne!(pair[0].primary, pair[1].primary, "{:?} {}", edge, pair[1].index);
            }
        }
    }

    #[test]
    fn top_and_bottom_start_with_different_accents() {
        let palette = Palette::default();
        let motifs = plan_border(1080.0, 1920.0, TILE_SIZE, &palette);
        assert_eq!(edge_tiles(&motifs, Edge::Top)[0].primary, palette.accent_red);
        assert_eq!(edge_tiles(&motifs, Edge::Bottom)[0].primary, palette.accent_green);
        assert_ne!(
            edge_tiles(&motifs, Edge::Left)[0].primary,
            edge_tiles(&motifs, Edge::Right)[0].primary
        );
    }

    #[test]
    fn only_bottom_peaks_and_right_steps_are_mirrored() {
        let motifs = plan_border(400.0, 400.0, TILE_SIZE, &Palette::default());
        for motif in motifs {
            let expected = matches!(motif.edge, Edge::Bottom | Edge::Right);
            assert_eq!(motif.mirrored, expected);
        }
    }

    #[test]
    fn tiles_start_at_corners() {
        let motifs = plan_border(400.0, 400.0, TILE_SIZE, &Palette::default());
        assert_eq!(edge_tiles(&motifs, Edge::Top)[0].x, 0.0);
        assert_eq!(edge_tiles(&motifs, Edge::Bottom)[0].y, 360.0);
        assert_eq!(edge_tiles(&motifs, Edge::Left)[0].y, TILE_SIZE);
        assert_eq!(edge_tiles(&motifs, Edge::Right)[0].x, 400.0);
    }

    #[test]
    fn peaks_point_at_the_outer_edge() {
        let palette = Palette::default();
        let surface = Surface::setup(40.0, 80.0, 1.0).unwrap();
        for (edge, y, mirrored) in [(Edge::Top, 0.0, false), (Edge::Bottom, 40.0, true)] {
            let motif = Motif {
                kind: MotifKind::Peak,
                edge,
                index: 0,
                x: 0.0,
                y,
                size: TILE_SIZE,
                primary: palette.accent_red,
                secondary: palette.secondary_gold,
                mirrored,
            };
            paint_motif(surface.context(), &motif, &palette).unwrap();
        }

        let pixels = surface.pixels().unwrap();
        let alpha = |x: usize, y: usize| pixels[(y * 40 + x) * 4 + 3];
        // Top row: apex at y = 0, base along y = 40.
        assert!(alpha(20, 1) > 0);
        assert_eq!(alpha(2, 1), 0);
        assert_eq!(alpha(2, 38), 255);
        // Bottom row: apex at y = 80, base along y = 40.
        assert!(alpha(20, 78) > 0);
        assert_eq!(alpha(2, 78), 0);
        assert_eq!(alpha(2, 41), 255);
    }

    #[test]
    fn mirrored_step_draws_inside_right_edge() {
        let palette = Palette::default();
        let surface = Surface::setup(80.0, 80.0, 1.0).unwrap();
        let motif = Motif {
            kind: MotifKind::Step,
            edge: Edge::Right,
            index: 0,
            x: 80.0,
            y: 0.0,
            size: TILE_SIZE,
            primary: palette.accent_orange,
            secondary: palette.primary_gold,
            mirrored: true,
        };
        paint_motif(surface.context(), &motif, &palette).unwrap();

        let pixels = surface.pixels().unwrap();
        let alpha = |x: usize, y: usize| pixels[(y * 80 + x) * 4 + 3];
        // Bottom band of the step spans the full tile width.
        assert_eq!(alpha(78, 38), 255);
        assert_eq!(alpha(42, 38), 255);
        assert_eq!(alpha(38, 38), 0);
    }
}
