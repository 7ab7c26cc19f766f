//! Font descriptors and best-effort font readiness checks.

use pango::prelude::*;
use std::time::Duration;

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, fallback family and
/// weight. Sizes are always absolute pixel sizes in logical card units, so
/// the layout result does not depend on the Pango resolution setting.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Preferred font family name (e.g., "Amiri", "Tajawal")
    pub family: String,

    /// Generic family Pango falls back to when `family` is not installed
    pub fallback: String,

    /// Font weight (e.g., "normal", "bold")
    pub weight: String,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: impl Into<String>, fallback: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            fallback: fallback.into(),
            weight: weight.into(),
        }
    }

    /// Same family and fallback with another weight.
    pub fn with_weight(&self, weight: &str) -> Self {
        Self {
            weight: weight.to_string(),
            ..self.clone()
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family,Fallback Weight SIZEpx"
    /// Example: "Amiri,Serif Bold 110px" or "Tajawal,Sans 24px"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![format!("{},{}", self.family, self.fallback)];

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size.round() as i32));

        parts.join(" ")
    }

    /// Builds the Pango description for `size` pixels.
    pub fn description(&self, size: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size))
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Returns true when the default Pango/Cairo font map lists `family`.
pub fn font_available(family: &str) -> bool {
    let font_map = pangocairo::FontMap::default();
    font_map
        .list_families()
        .iter()
        .any(|f| f.name().eq_ignore_ascii_case(family))
}

/// Waits, best effort, until every family in `families` is usable.
///
/// Returns the families that are still missing when the check finishes or
/// the timeout expires. Missing fonts are a degraded-quality condition: the
/// caller renders anyway and Pango substitutes the fallback family.
pub async fn await_fonts(families: &[String], timeout: Duration) -> Vec<String> {
    let check = async {
        // Font map enumeration is synchronous; yield first so the caller's
        // busy state is published before the scan.
        tokio::task::yield_now().await;
        families
            .iter()
            .filter(|family| !font_available(family))
            .cloned()
            .collect::<Vec<_>>()
    };

    let missing = match tokio::time::timeout(timeout, check).await {
        Ok(missing) => missing,
        Err(_) => {
            log::warn!("Font readiness check timed out after {:?}", timeout);
            families.to_vec()
        }
    };

    for family in &missing {
        log::warn!("Font '{}' not available, falling back to generic family", family);
    }
    missing
}
