//! Share pathway: native share with a messaging deep-link fallback.
//!
//! A share first offers the PNG and caption to a [`NativeShare`] target. If
//! the target is missing, declines the file, is cancelled or fails, the
//! fallback caption is sent through a `wa.me` link opened by a
//! [`LinkOpener`]. Only a failure to open that link is reported as an error.

use super::file::prefixed_filename;
use super::types::{CardImage, ExportError, ShareOutcome};
use crate::card::{CardName, CardRenderer};
use crate::config::ShareConfig;
use async_trait::async_trait;
use cairo::{Format, ImageSurface};
use url::Url;

/// What a native share target receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub file_name: String,
    pub mime_type: &'static str,
    pub png: Vec<u8>,
}

/// A platform share sheet.
#[async_trait]
pub trait NativeShare: Send + Sync {
    /// Whether the target is present at all.
    fn is_available(&self) -> bool;

    /// Whether the target would accept this particular request (file type, size).
    fn can_share(&self, request: &ShareRequest) -> bool;

    async fn share(&self, request: &ShareRequest) -> Result<(), ExportError>;
}

/// Opens a URL outside the process.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn open(&self, url: &Url) -> Result<(), ExportError>;
}

/// No native share target. Every share takes the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl NativeShare for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn can_share(&self, _request: &ShareRequest) -> bool {
        false
    }

    async fn share(&self, _request: &ShareRequest) -> Result<(), ExportError> {
        Err(ExportError::Unsupported)
    }
}

/// Hands links to the desktop's default handler.
///
/// The handler is waited on, so its exit status decides the outcome and no
/// child process outlives the call.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new("xdg-open")
    }
}

#[async_trait]
impl LinkOpener for SystemOpener {
    async fn open(&self, url: &Url) -> Result<(), ExportError> {
        log::info!("Opening share link with {}", self.program);
        let status = tokio::process::Command::new(&self.program)
            .arg(url.as_str())
            .status()
            .await
            .map_err(|e| ExportError::Open(format!("{}: {}", self.program, e)))?;
        if status.success() {
            Ok(())
        } else {
            Err(ExportError::Open(format!("{} exited with {}", self.program, status)))
        }
    }
}

/// Writes links to stdout instead of opening them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOpener;

#[async_trait]
impl LinkOpener for PrintOpener {
    async fn open(&self, url: &Url) -> Result<(), ExportError> {
        println!("{}", url);
        Ok(())
    }
}

fn caption(config: &ShareConfig, greeting: &str, name: &CardName) -> String {
    format!(
        "{} {} {}\n\n{} {}\n{} {}",
        greeting,
        config.dedication,
        name,
        config.developer_label,
        config.developer,
        config.site_label,
        config.site_url
    )
}

/// Caption attached to a native share.
pub fn share_caption(config: &ShareConfig, name: &CardName) -> String {
    caption(config, &config.greeting, name)
}

/// Caption sent through the deep link, with a crescent after the greeting.
pub fn fallback_caption(config: &ShareConfig, name: &CardName) -> String {
    caption(config, &format!("{} 🌙", config.greeting), name)
}

/// `<fallback_base>?text=<encoded fallback caption>`.
pub fn deep_link(config: &ShareConfig, name: &CardName) -> Result<Url, ExportError> {
    let mut url = Url::parse(&config.fallback_base)
        .map_err(|e| ExportError::Open(format!("invalid fallback link '{}': {}", config.fallback_base, e)))?;
    url.query_pairs_mut()
        .clear()
        .append_pair("text", &fallback_caption(config, name));
    Ok(url)
}

/// Copies the renderer's pixels out for encoding.
pub fn capture_image(renderer: &CardRenderer) -> Result<CardImage, ExportError> {
    if renderer.state().is_empty() {
        return Err(ExportError::EmptyImage);
    }
    let (width, height) = renderer.surface().pixel_size();
    let data = renderer
        .surface()
        .pixels()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(CardImage { data, width, height })
}

/// Encodes `image` as PNG.
///
/// The encode runs on the calling task after one cooperative yield, so the
/// caller's event loop gets a turn before the CPU-bound work starts.
pub async fn encode_png(image: CardImage) -> Result<Vec<u8>, ExportError> {
    if image.is_empty() {
        return Err(ExportError::EmptyImage);
    }
    tokio::task::yield_now().await;

    let stride = image.width * 4;
    let surface = ImageSurface::create_for_data(
        image.data,
        Format::ARgb32,
        image.width,
        image.height,
        stride,
    )
    .map_err(|e| ExportError::Encode(e.to_string()))?;
    let mut buffer = Vec::new();
    surface
        .write_to_png(&mut buffer)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    log::debug!("Encoded card PNG: {} bytes", buffer.len());
    Ok(buffer)
}

/// Shares the card, falling back to the deep link on any native failure.
pub async fn share_card(
    image: CardImage,
    name: &CardName,
    config: &ShareConfig,
    filename_prefix: &str,
    native: &dyn NativeShare,
    opener: &dyn LinkOpener,
) -> Result<ShareOutcome, ExportError> {
    match try_native(image, name, config, filename_prefix, native).await {
        Ok(()) => {
            log::info!("Card shared natively");
            return Ok(ShareOutcome::Native);
        }
        Err(e) => log::warn!("Native share unavailable ({}), using link fallback", e),
    }

    let url = deep_link(config, name)?;
    opener.open(&url).await?;
    log::info!("Opened share fallback link");
    Ok(ShareOutcome::Fallback { url })
}

async fn try_native(
    image: CardImage,
    name: &CardName,
    config: &ShareConfig,
    filename_prefix: &str,
    native: &dyn NativeShare,
) -> Result<(), ExportError> {
    if !native.is_available() {
        return Err(ExportError::Unsupported);
    }
    let png = encode_png(image).await?;
    if png.is_empty() {
        return Err(ExportError::EmptyImage);
    }

    let request = ShareRequest {
        title: config.title.clone(),
        text: share_caption(config, name),
        file_name: prefixed_filename(filename_prefix, name),
        mime_type: "image/png",
        png,
    };
    if !native.can_share(&request) {
        return Err(ExportError::Unsupported);
    }
    native.share(&request).await
}
