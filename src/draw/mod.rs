//! Card painters and rendering primitives (Cairo + Pango based).
//!
//! Every painter takes an explicit [`cairo::Context`] and immutable inputs;
//! painters interact only through paint order:
//! - [`Surface`]: the scaled ARGB32 raster a card is painted on
//! - [`background`]: gradient and faint geometric pattern
//! - [`border`]: alternating Peak/Step motif frame
//! - [`celestial`]: crescent moon and hanging lanterns
//! - [`text`]: greeting and branding lines

pub mod background;
pub mod border;
pub mod celestial;
pub mod color;
pub mod font;
pub mod shadow;
pub mod surface;
pub mod text;

// Re-export commonly used types at module level
pub use color::{Color, Palette};
pub use font::FontDescriptor;
pub use shadow::{Shadow, with_shadow};
pub use surface::{DisplaySize, Surface};
