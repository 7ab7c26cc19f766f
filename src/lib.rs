//! Library exports for lanternpost.
//!
//! Exposes the card pipeline (configuration, painters, renderer and session)
//! and the export routines so the CLI and schema tooling share one
//! implementation.

pub mod card;
pub mod config;
pub mod draw;
pub mod export;

pub use card::{CardName, CardRenderer, CardSession, RenderConfig};
pub use config::Config;
