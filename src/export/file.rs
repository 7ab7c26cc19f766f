//! Download pathway: file naming and writing the PNG to disk.

use super::types::ExportError;
use crate::card::{CardName, CardRenderer};
use crate::config::ExportConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of every downloaded card.
pub const DEFAULT_PREFIX: &str = "Ramadan_";

/// File name offered for download: `Ramadan_<name>.png`.
///
/// The name is embedded exactly as entered (after trimming).
pub fn download_filename(name: &CardName) -> String {
    prefixed_filename(DEFAULT_PREFIX, name)
}

/// `<prefix><name>.png`.
pub fn prefixed_filename(prefix: &str, name: &CardName) -> String {
    format!("{}{}.png", prefix, name)
}

/// Replaces the characters no filesystem accepts in a file name.
///
/// Only path separators and NUL are touched; every other character,
/// including right-to-left text and emoji, is kept.
pub fn filesystem_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}

/// Ensure the output directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating card directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Directory cards are written to: the explicit override, then the config
/// value, then the working directory.
pub fn resolve_output_dir(config: &ExportConfig, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    match config.output_dir.as_deref() {
        Some(dir) if !dir.trim().is_empty() => expand_tilde(dir),
        _ => PathBuf::from("."),
    }
}

/// Writes `png` as `file_name` inside `directory`.
///
/// # Returns
/// Path to the saved file
pub fn save_card(png: &[u8], file_name: &str, directory: &Path) -> Result<PathBuf, ExportError> {
    if png.is_empty() {
        return Err(ExportError::EmptyImage);
    }

    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(filesystem_safe(file_name));

    log::info!(
        "Saving card to: {} ({} bytes)",
        file_path.display(),
        png.len()
    );

    fs::write(&file_path, png)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(file_path)
}

/// Encodes the renderer's current card and saves it under `directory`.
///
/// Fails with [`ExportError::EmptyImage`] when nothing has been rendered.
pub fn download_card(
    renderer: &CardRenderer,
    config: &ExportConfig,
    directory: &Path,
) -> Result<PathBuf, ExportError> {
    let name = renderer.state().name().ok_or(ExportError::EmptyImage)?;
    let png = renderer
        .surface()
        .to_png()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    let path = save_card(&png, &prefixed_filename(&config.filename_prefix, name), directory)?;
    log::info!("Card downloaded: {}", path.display());
    Ok(path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
