//! Blurred drop shadows and glows for Cairo drawing.
//!
//! Cairo has no shadow state, so a shadow is produced by replaying the
//! drawing into an A8 mask the size of the target, blurring that mask and
//! painting the shadow color through it before the drawing itself. Nothing
//! is left set on the caller's context afterwards.

use super::color::Color;
use cairo::{Context, Format, ImageSurface};

/// Shadow parameters in the user space of the context they are applied to.
///
/// `blur` follows the usual canvas convention: the Gaussian standard
/// deviation is half of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Shadow {
    /// A centred glow with no offset.
    pub fn glow(color: Color, blur: f64) -> Self {
        Self {
            color,
            blur,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// An offset drop shadow.
    pub fn drop(color: Color, blur: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            color,
            blur,
            offset_x,
            offset_y,
        }
    }

    /// True when painting this shadow would have a visible effect.
    pub fn is_visible(&self) -> bool {
        self.color.a > 0.0 && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

/// Runs `draw` with `shadow` painted beneath it.
///
/// `draw` is invoked twice: once against the shadow mask and once against
/// `ctx`. It must set its own sources and operators. When the mask cannot be
/// built (non-image target, allocation failure) the shadow is skipped with a
/// warning and only the drawing is performed.
pub fn with_shadow<F>(ctx: &Context, shadow: Option<&Shadow>, draw: F) -> Result<(), cairo::Error>
where
    F: Fn(&Context) -> Result<(), cairo::Error>,
{
    if let Some(shadow) = shadow.filter(|s| s.is_visible()) {
        match paint_shadow(ctx, shadow, &draw) {
            Ok(()) => {}
            Err(ShadowError::Cairo(err)) => return Err(err),
            Err(err) => log::warn!("Skipping shadow: {}", err),
        }
    }
    draw(ctx)
}

#[derive(Debug, thiserror::Error)]
enum ShadowError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("target is not an image surface")]
    NotImage,
    #[error("mask buffer busy: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

fn paint_shadow<F>(ctx: &Context, shadow: &Shadow, draw: &F) -> Result<(), ShadowError>
where
    F: Fn(&Context) -> Result<(), cairo::Error>,
{
    let target = ImageSurface::try_from(ctx.target()).map_err(|_| ShadowError::NotImage)?;
    let (width, height) = (target.width(), target.height());

    let matrix = ctx.matrix();
    let (blur_x, blur_y) = matrix.transform_distance(shadow.blur, 0.0);
    let device_blur = blur_x.hypot(blur_y);
    let (dx, dy) = matrix.transform_distance(shadow.offset_x, shadow.offset_y);

    let mut mask = ImageSurface::create(Format::A8, width, height)?;
    {
        let mask_ctx = Context::new(&mask)?;
        mask_ctx.set_matrix(matrix);
        draw(&mask_ctx)?;
    }
    mask.flush();

    let sigma = device_blur / 2.0;
    if sigma > 0.0 {
        let stride = mask.stride() as usize;
        let mut data = mask.data()?;
        blur_alpha(&mut data, width as usize, height as usize, stride, sigma);
    }
    mask.mark_dirty();

    ctx.save()?;
    ctx.identity_matrix();
    shadow.color.apply(ctx);
    let painted = ctx.mask_surface(&mask, dx, dy);
    ctx.restore()?;
    painted?;
    Ok(())
}

/// Box sizes whose successive application approximates a Gaussian of `sigma`.
pub fn box_radii(sigma: f64, passes: usize) -> Vec<usize> {
    let n = passes as f64;
    let ideal = ((12.0 * sigma * sigma / n) + 1.0).sqrt();
    let mut lower = ideal.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower + 2;
    let m = ((12.0 * sigma * sigma
        - n * (lower * lower) as f64
        - 4.0 * n * lower as f64
        - 3.0 * n)
        / (-4.0 * lower as f64 - 4.0))
        .round() as i64;

    (0..passes as i64)
        .map(|i| if i < m { lower } else { upper })
        .map(|size| ((size - 1) / 2) as usize)
        .collect()
}

/// Box passes per blur; 1 = box blur, 2 = triangle-like, 3 ≈ Gaussian.
pub const BLUR_PASSES: usize = 3;

/// Approximates a Gaussian blur on an 8-bit alpha buffer with box passes.
///
/// Only the bounding box of non-zero pixels, padded by the blur reach, is
/// processed; the rest of the buffer stays zero.
pub fn blur_alpha(data: &mut [u8], width: usize, height: usize, stride: usize, sigma: f64) {
    let Some((x0, y0, x1, y1)) = coverage_bounds(data, width, height, stride) else {
        return;
    };

    let radii = box_radii(sigma, BLUR_PASSES);
    let reach: usize = radii.iter().sum::<usize>() + 1;
    let region = BlurRegion {
        x0: x0.saturating_sub(reach),
        y0: y0.saturating_sub(reach),
        x1: (x1 + reach + 1).min(width),
        y1: (y1 + reach + 1).min(height),
    };

    for radius in radii {
        blur_region(data, stride, region, radius);
    }
}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurRegion {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

/// One separable box pass over `region`: every row, then every column.
///
/// Pixels outside the region count as zero and are never written.
pub fn blur_region(data: &mut [u8], stride: usize, region: BlurRegion, radius: usize) {
    if radius == 0 || region.x0 >= region.x1 || region.y0 >= region.y1 {
        return;
    }
    let w = region.x1 - region.x0;
    let h = region.y1 - region.y0;
    let mut temp = vec![0u8; w.max(h)];

    // Horizontal pass: blur each row
    for row in region.y0..region.y1 {
        let row_off = row * stride + region.x0;
        blur_line(data, row_off, 1, radius, &mut temp[..w]);
        data[row_off..row_off + w].copy_from_slice(&temp[..w]);
    }

    // Vertical pass: blur each column
    for col in region.x0..region.x1 {
        let col_off = region.y0 * stride + col;
        blur_line(data, col_off, stride, radius, &mut temp[..h]);
        for (row, value) in temp[..h].iter().enumerate() {
            data[col_off + row * stride] = *value;
        }
    }
}

/// Running-sum box filter of `radius` along one line of `out.len()` samples
/// starting at `start`, `step` bytes apart. Samples past either end are zero.
fn blur_line(data: &[u8], start: usize, step: usize, radius: usize, out: &mut [u8]) {
    let len = out.len();
    let kernel = (2 * radius + 1) as u32;
    let sample = |i: usize| data[start + i * step] as u32;

    // Initialize window: [-radius, radius] around the first sample
    let mut sum: u32 = (0..=radius.min(len.saturating_sub(1))).map(sample).sum();
    for pos in 0..len {
        out[pos] = ((sum + kernel / 2) / kernel) as u8;

        // Slide window: add right sample, remove left sample
        if pos + radius + 1 < len {
            sum += sample(pos + radius + 1);
        }
        if pos >= radius {
            sum -= sample(pos - radius);
        }
    }
}

fn coverage_bounds(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in 0..height {
        let row = &data[y * stride..y * stride + width];
        let Some(first) = row.iter().position(|&v| v != 0) else {
            continue;
        };
        let last = row.iter().rposition(|&v| v != 0).unwrap_or(first);
        bounds = Some(match bounds {
            None => (first, y, last, y),
            Some((x0, y0, x1, _)) => (x0.min(first), y0, x1.max(last), y),
        });
    }
    bounds
}
