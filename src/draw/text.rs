//! Greeting and branding text layers (Pango-based).
//!
//! Every line gets its own Pango layout with an explicit base direction and
//! its own optional shadow, so neither direction nor shadow settings can
//! carry over from one line or layer to the next.

use super::color::{BLACK, Color, Palette};
use super::font::FontDescriptor;
use super::shadow::{Shadow, with_shadow};
use cairo::Context;

/// Fixed card copy, everything except the user's name.
#[derive(Debug, Clone, PartialEq)]
pub struct CardText {
    pub header: String,
    pub subheader: String,
    pub footer: String,
    pub credit: String,
    pub support: String,
}

/// Bounds of the name auto-fit search, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameFit {
    pub min_size: f64,
    pub max_size: f64,
}

/// One centred line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font: FontDescriptor,
    pub size: f64,
    pub color: Color,
    /// Baseline position in logical units.
    pub baseline: f64,
    pub direction: pango::Direction,
    pub shadow: Option<Shadow>,
    /// When set, the font shrinks until the line fits this width.
    pub fit: Option<(NameFit, f64)>,
}

/// Everything the text painters read.
#[derive(Debug, Clone, Copy)]
pub struct TextLayer<'a> {
    pub width: f64,
    pub height: f64,
    /// Width available to the name line.
    pub usable_width: f64,
    pub palette: &'a Palette,
    pub display_font: &'a FontDescriptor,
    pub branding_font: &'a FontDescriptor,
    pub text: &'a CardText,
    pub name_fit: NameFit,
}

/// Result of the name size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub size: f64,
    /// False when even the minimum size is wider than allowed.
    pub fits: bool,
}

/// Finds the largest whole pixel size in `[min, max]` whose measured width
/// is at most `max_width`, by binary search over `measure`.
///
/// `measure` must be monotonic in the size. When the minimum size already
/// overflows, the minimum is returned with `fits == false`.
pub fn fit_font_size(min: f64, max: f64, max_width: f64, measure: impl Fn(f64) -> f64) -> FitResult {
    let mut lo = min.ceil().max(1.0) as i64;
    let mut hi = (max.floor() as i64).max(lo);

    if measure(hi as f64) <= max_width {
        return FitResult {
            size: hi as f64,
            fits: true,
        };
    }
    if measure(lo as f64) > max_width {
        return FitResult {
            size: lo as f64,
            fits: false,
        };
    }

    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if measure(mid as f64) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    FitResult {
        size: lo as f64,
        fits: true,
    }
}

/// The four greeting lines, top to bottom.
pub fn greeting_lines(layer: &TextLayer<'_>, name: &str) -> Vec<TextLine> {
    let cy = layer.height / 2.0;
    let palette = layer.palette;
    let font = layer.display_font;

    vec![
        TextLine {
            text: layer.text.header.clone(),
            font: font.clone(),
            size: 80.0,
            color: palette.primary_gold,
            baseline: cy - 200.0,
            direction: pango::Direction::Rtl,
            shadow: Some(Shadow::drop(BLACK, 4.0, 2.0, 2.0)),
            fit: None,
        },
        TextLine {
            text: layer.text.subheader.clone(),
            font: font.clone(),
            size: 45.0,
            color: palette.off_white,
            baseline: cy - 100.0,
            direction: pango::Direction::Rtl,
            shadow: Some(Shadow::drop(BLACK, 2.0, 2.0, 2.0)),
            fit: None,
        },
        TextLine {
            text: name.to_string(),
            font: font.with_weight("bold"),
            size: layer.name_fit.max_size,
            color: palette.white,
            baseline: cy + 100.0,
            direction: pango::Direction::Rtl,
            shadow: Some(Shadow::glow(palette.secondary_gold, 25.0)),
            fit: Some((layer.name_fit, layer.usable_width)),
        },
        TextLine {
            text: layer.text.footer.clone(),
            font: font.clone(),
            size: 35.0,
            color: Color::from_rgb8(0xAA, 0xAA, 0xAA),
            baseline: cy + 250.0,
            direction: pango::Direction::Rtl,
            shadow: None,
            fit: None,
        },
    ]
}

/// The two left-to-right branding lines near the bottom edge.
pub fn branding_lines(layer: &TextLayer<'_>) -> Vec<TextLine> {
    let bottom = layer.height - 60.0;
    let white = layer.palette.white;

    vec![
        TextLine {
            text: layer.text.credit.clone(),
            font: layer.branding_font.clone(),
            size: 24.0,
            color: white.with_alpha(0.7),
            baseline: bottom - 35.0,
            direction: pango::Direction::Ltr,
            shadow: None,
            fit: None,
        },
        TextLine {
            text: layer.text.support.clone(),
            font: layer.branding_font.clone(),
            size: 20.0,
            color: white.with_alpha(0.5),
            baseline: bottom,
            direction: pango::Direction::Ltr,
            shadow: None,
            fit: None,
        },
    ]
}

/// Builds the Pango layout for `line`, applying the auto-fit policy.
pub fn layout_line(ctx: &Context, line: &TextLine) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let pango_ctx = layout.context();
    pango_ctx.set_base_dir(line.direction);
    layout.context_changed();
    layout.set_auto_dir(false);
    layout.set_text(&line.text);

    let size = match line.fit {
        Some((fit, max_width)) => {
            let result = fit_font_size(fit.min_size, fit.max_size, max_width, |size| {
                layout.set_font_description(Some(&line.font.description(size)));
                layout.pixel_size().0 as f64
            });
            if !result.fits {
                log::warn!(
                    "Line does not fit at {}px, ellipsizing to {}",
                    result.size,
                    max_width
                );
                layout.set_width((max_width * pango::SCALE as f64) as i32);
                layout.set_ellipsize(pango::EllipsizeMode::End);
            }
            log::debug!("Fitted line to {}px", result.size);
            result.size
        }
        None => line.size,
    };
    layout.set_font_description(Some(&line.font.description(size)));
    layout
}

/// Paints `line` centred on `center_x`.
pub fn paint_line(ctx: &Context, center_x: f64, line: &TextLine) -> Result<(), cairo::Error> {
    ctx.save()?;
    let layout = layout_line(ctx, line);

    let (_, logical) = layout.pixel_extents();
    let x = center_x - (logical.x() as f64 + logical.width() as f64 / 2.0);
    let top = line.baseline - layout.baseline() as f64 / pango::SCALE as f64;

    let result = with_shadow(ctx, line.shadow.as_ref(), |c| {
        line.color.apply(c);
        c.move_to(x, top);
        pangocairo::functions::show_layout(c, &layout);
        Ok(())
    });
    ctx.restore()?;
    result
}

/// Paints header, subheader, name and footer.
pub fn paint_greeting(ctx: &Context, layer: &TextLayer<'_>, name: &str) -> Result<(), cairo::Error> {
    let center_x = layer.width / 2.0;
    for line in greeting_lines(layer, name) {
        paint_line(ctx, center_x, &line)?;
    }
    Ok(())
}

/// Paints the developer credit and support lines.
pub fn paint_branding(ctx: &Context, layer: &TextLayer<'_>) -> Result<(), cairo::Error> {
    let center_x = layer.width / 2.0;
    for line in branding_lines(layer) {
        paint_line(ctx, center_x, &line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::surface::Surface;
    use std::cell::Cell;

    fn sample_text() -> CardText {
        CardText {
            header: "header".into(),
            subheader: "subheader".into(),
            footer: "footer".into(),
            credit: "credit".into(),
            support: "support".into(),
        }
    }

    fn with_layer<R>(f: impl FnOnce(&TextLayer<'_>) -> R) -> R {
        let palette = Palette::default();
        let display = FontDescriptor::new("Amiri", "Serif", "normal");
        let branding = FontDescriptor::new("Tajawal", "Sans", "normal");
        let text = sample_text();
        let layer = TextLayer {
            width: 1080.0,
            height: 1920.0,
            usable_width: 920.0,
            palette: &palette,
            display_font: &display,
            branding_font: &branding,
            text: &text,
            name_fit: NameFit {
                min_size: 40.0,
                max_size: 110.0,
            },
        };
        f(&layer)
    }

    #[test]
    fn fit_keeps_max_when_it_fits() {
        let result = fit_font_size(40.0, 110.0, 920.0, |size| size * 3.0);
        assert_eq!(result, FitResult { size: 110.0, fits: true });
    }

    #[test]
    fn fit_finds_largest_fitting_size() {
        let calls = Cell::new(0);
        // Width grows 10 units per pixel of size: 920 / 10 = 92.
        let result = fit_font_size(40.0, 110.0, 920.0, |size| {
            calls.set(calls.get() + 1);
            size * 10.0
        });
        assert_eq!(result, FitResult { size: 92.0, fits: true });
        assert!(calls.get() <= 10, "binary search, got {} calls", calls.get());
    }

    #[test]
    fn fit_reports_overflow_at_minimum() {
        let result = fit_font_size(40.0, 110.0, 920.0, |size| size * 100.0);
        assert_eq!(result, FitResult { size: 40.0, fits: false });
    }

    #[test]
    fn greeting_is_rtl_and_branding_is_ltr() {
        with_layer(|layer| {
            let greeting = greeting_lines(layer, "Ahmed");
            assert_eq!(greeting.len(), 4);
            assert!(greeting.iter().all(|l| l.direction == pango::Direction::Rtl));
            assert_eq!(greeting[2].text, "Ahmed");
            assert_eq!(greeting[2].font.weight, "bold");

            let branding = branding_lines(layer);
            assert_eq!(branding.len(), 2);
            assert!(branding.iter().all(|l| l.direction == pango::Direction::Ltr));
            assert!(branding.iter().all(|l| l.shadow.is_none()));
        });
    }

    #[test]
    fn shadows_are_configured_per_line() {
        with_layer(|layer| {
            let lines = greeting_lines(layer, "x");
            let header = lines[0].shadow.unwrap();
            assert_eq!((header.offset_x, header.offset_y), (2.0, 2.0));
            let name = lines[2].shadow.unwrap();
            assert_eq!((name.offset_x, name.offset_y, name.blur), (0.0, 0.0, 25.0));
            assert!(lines[3].shadow.is_none());
        });
    }

    #[test]
    fn layouts_carry_their_own_direction() {
        let surface = Surface::setup(200.0, 200.0, 1.0).unwrap();
        with_layer(|layer| {
            let rtl = layout_line(surface.context(), &greeting_lines(layer, "x")[0]);
            let ltr = layout_line(surface.context(), &branding_lines(layer)[0]);
            assert_eq!(rtl.context().base_dir(), pango::Direction::Rtl);
            assert_eq!(ltr.context().base_dir(), pango::Direction::Ltr);
        });
    }

    #[test]
    fn long_name_never_exceeds_usable_width() {
        let surface = Surface::setup(1080.0, 1920.0, 1.0).unwrap();
        with_layer(|layer| {
            let name = "Abdulrahman Mohammed Al-Qahtani Abdulrahman Mohammed Al-Qahtani";
            let line = &greeting_lines(layer, name)[2];
            let layout = layout_line(surface.context(), line);
            assert!(layout.pixel_size().0 as f64 <= layer.usable_width + 1.0);
        });
    }

    #[test]
    fn painting_text_restores_context() {
        let surface = Surface::setup(1080.0, 1920.0, 1.0).unwrap();
        let ctx = surface.context();
        ctx.set_source_rgba(0.1, 0.2, 0.3, 0.4);
        with_layer(|layer| {
            paint_greeting(ctx, layer, "Ahmed").unwrap();
            paint_branding(ctx, layer).unwrap();
        });
        let source = ctx.source();
        let solid = cairo::SolidPattern::try_from(source).unwrap();
        let (r, g, b, a) = solid.rgba().unwrap();
        assert_eq!((r, g, b, a), (0.1, 0.2, 0.3, 0.4));
    }
}
