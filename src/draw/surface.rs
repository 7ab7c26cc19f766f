//! Raster surface owned by the card renderer.
//!
//! The surface keeps its pixel buffer at `logical × scale` and installs an
//! absolute scale matrix on its context, so painters always work in logical
//! card units whatever the device density is.

use cairo::{Context, Format, ImageSurface, Matrix, Operator};

/// Highest device pixel ratio honoured when sizing the raster.
pub const MAX_DEVICE_SCALE: f64 = 2.0;

/// Largest display width (CSS-equivalent units) the card is shown at.
pub const MAX_DISPLAY_WIDTH: f64 = 500.0;

/// Clamps a device pixel ratio to the range the renderer supports.
///
/// Ratios that are not finite or not positive count as 1.0.
pub fn effective_scale(device_ratio: f64) -> f64 {
    if !device_ratio.is_finite() || device_ratio <= 0.0 {
        1.0
    } else {
        device_ratio.min(MAX_DEVICE_SCALE)
    }
}

/// Size a card is laid out at on screen, aspect ratio preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// Raster drawing target plus the context painters draw with.
pub struct Surface {
    image: ImageSurface,
    ctx: Context,
    logical_width: f64,
    logical_height: f64,
    scale: f64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("logical_width", &self.logical_width)
            .field("logical_height", &self.logical_height)
            .field("scale", &self.scale)
            .field("pixel_width", &self.image.width())
            .field("pixel_height", &self.image.height())
            .finish()
    }
}

impl Surface {
    /// Allocates a surface of `width × height` logical units.
    pub fn setup(width: f64, height: f64, device_ratio: f64) -> Result<Self, cairo::Error> {
        let scale = effective_scale(device_ratio);
        let (pixel_width, pixel_height) = pixel_size(width, height, scale);
        let image = ImageSurface::create(Format::ARgb32, pixel_width, pixel_height)?;
        let ctx = Context::new(&image)?;

        let mut surface = Self {
            image,
            ctx,
            logical_width: width,
            logical_height: height,
            scale,
        };
        surface.install_scale();
        log::debug!("Allocated card surface: {:?}", surface);
        Ok(surface)
    }

    /// Prepares the surface for a fresh render.
    ///
    /// Reuses the pixel buffer when the size is unchanged (clearing it to
    /// transparent) and reallocates otherwise. In both cases the context ends
    /// with the absolute `scale` matrix and default paint state.
    pub fn reset(&mut self, width: f64, height: f64, device_ratio: f64) -> Result<(), cairo::Error> {
        let scale = effective_scale(device_ratio);
        let (pixel_width, pixel_height) = pixel_size(width, height, scale);

        if pixel_width != self.image.width() || pixel_height != self.image.height() {
            *self = Self::setup(width, height, device_ratio)?;
            return Ok(());
        }

        // A fresh context drops any state a previous render left behind.
        self.ctx = Context::new(&self.image)?;
        self.ctx.set_operator(Operator::Clear);
        self.ctx.paint()?;
        self.ctx.set_operator(Operator::Over);

        self.logical_width = width;
        self.logical_height = height;
        self.scale = scale;
        self.install_scale();
        Ok(())
    }

    fn install_scale(&mut self) {
        self.ctx
            .set_matrix(Matrix::new(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0));
    }

    /// Drawing context in logical coordinates.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Underlying pixel buffer.
    pub fn image(&self) -> &ImageSurface {
        &self.image
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    pub fn pixel_size(&self) -> (i32, i32) {
        (self.image.width(), self.image.height())
    }

    /// Logical area covered by the surface, derived from the live matrix.
    pub fn drawable_area(&self) -> (f64, f64) {
        let inverse = self.ctx.matrix().try_invert().unwrap_or(Matrix::identity());
        inverse.transform_distance(self.image.width() as f64, self.image.height() as f64)
    }

    /// Display box for a container `container_width` units wide.
    pub fn display_size(&self, container_width: f64) -> DisplaySize {
        display_size(self.logical_width, self.logical_height, container_width)
    }

    /// Copies the raw pixels out (ARGB32, premultiplied, row-major).
    pub fn pixels(&self) -> Result<Vec<u8>, cairo::BorrowError> {
        self.image.flush();
        let width = self.image.width() as usize;
        let height = self.image.height() as usize;
        let stride = self.image.stride() as usize;

        let mut out = Vec::with_capacity(width * height * 4);
        self.image.with_data(|data| {
            for row in data.chunks(stride).take(height) {
                out.extend_from_slice(&row[..width * 4]);
            }
        })?;
        Ok(out)
    }

    /// Encodes the surface as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, cairo::IoError> {
        self.image.flush();
        let mut buffer = Vec::new();
        self.image.write_to_png(&mut buffer)?;
        Ok(buffer)
    }
}

fn pixel_size(width: f64, height: f64, scale: f64) -> (i32, i32) {
    (
        (width * scale).round().max(1.0) as i32,
        (height * scale).round().max(1.0) as i32,
    )
}

/// Display box for a `width × height` card inside a container.
pub fn display_size(width: f64, height: f64, container_width: f64) -> DisplaySize {
    let shown = container_width.clamp(0.0, MAX_DISPLAY_WIDTH);
    DisplaySize {
        width: shown,
        height: shown * height / width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_capped_at_two() {
        assert_eq!(effective_scale(3.0), 2.0);
        assert_eq!(effective_scale(1.5), 1.5);
        assert_eq!(effective_scale(0.0), 1.0);
        assert_eq!(effective_scale(f64::NAN), 1.0);
    }

    #[test]
    fn pixel_size_is_logical_times_scale() {
        let surface = Surface::setup(108.0, 192.0, 2.0).unwrap();
        assert_eq!(surface.pixel_size(), (216, 384));
        assert_eq!(surface.logical_size(), (108.0, 192.0));
    }

    #[test]
    fn repeated_reset_does_not_compound_scale() {
        let mut surface = Surface::setup(100.0, 50.0, 2.0).unwrap();
        surface.reset(100.0, 50.0, 2.0).unwrap();
        surface.reset(100.0, 50.0, 2.0).unwrap();
        let (w, h) = surface.drawable_area();
        assert!((w - 100.0).abs() < 1e-9);
        assert!((h - 50.0).abs() < 1e-9);
    }

    #[test]
    fn reset_reallocates_on_scale_change() {
        let mut surface = Surface::setup(100.0, 50.0, 1.0).unwrap();
        surface.reset(100.0, 50.0, 2.0).unwrap();
        assert_eq!(surface.pixel_size(), (200, 100));
        let (w, h) = surface.drawable_area();
        assert!((w - 100.0).abs() < 1e-9 && (h - 50.0).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_previous_pixels() {
        let mut surface = Surface::setup(10.0, 10.0, 1.0).unwrap();
        surface.context().set_source_rgb(1.0, 0.0, 0.0);
        surface.context().paint().unwrap();
        surface.reset(10.0, 10.0, 1.0).unwrap();
        assert!(surface.pixels().unwrap().iter().all(|b| *b == 0));
    }

    #[test]
    fn display_size_keeps_aspect_ratio() {
        let size = display_size(1080.0, 1920.0, 800.0);
        assert_eq!(size.width, 500.0);
        assert!((size.height - 500.0 * 1920.0 / 1080.0).abs() < 1e-9);

        let narrow = display_size(1080.0, 1920.0, 270.0);
        assert_eq!(narrow.width, 270.0);
        assert!((narrow.height - 480.0).abs() < 1e-9);
    }

    #[test]
    fn png_has_signature() {
        let surface = Surface::setup(4.0, 4.0, 1.0).unwrap();
        let png = surface.to_png().unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
