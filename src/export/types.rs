//! Data types for the download and share pathways.

use thiserror::Error;
use url::Url;

/// Outcome of a share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share target accepted the image.
    Native,
    /// The messaging deep link was opened instead.
    Fallback { url: Url },
}

/// Errors that can occur while exporting a card.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No card has been rendered yet")]
    EmptyImage,

    #[error("Native sharing is not supported here")]
    Unsupported,

    #[error("Share cancelled by user")]
    Cancelled,

    #[error("Share target rejected the card: {0}")]
    Rejected(String),

    #[error("Failed to save card: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Could not open share link: {0}")]
    Open(String),
}

/// Snapshot of the card raster, detached from the Cairo surface so it can
/// be encoded off the render thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    /// Premultiplied ARGB32 pixels, rows tightly packed.
    pub data: Vec<u8>,
    pub width: i32,
    pub height: i32,
}

impl CardImage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width <= 0 || self.height <= 0
    }
}
