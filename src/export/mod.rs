//! Card export for lanternpost.
//!
//! This module provides the two ways a rendered card leaves the process:
//! - Download: encoded PNG written as `Ramadan_<name>.png`
//! - Share: native share target, or a messaging deep link as fallback

pub mod file;
pub mod share;
pub mod types;

pub use file::{download_card, download_filename, save_card};
pub use share::{LinkOpener, NativeShare, PrintOpener, SystemOpener, Unavailable, share_card};
pub use types::{CardImage, ExportError, ShareOutcome};
