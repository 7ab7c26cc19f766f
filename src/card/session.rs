//! Cooperative card generation: validate, gate, wait for fonts, render.

use super::renderer::{CardRenderer, RenderConfig, RenderError};
use super::state::{CardName, CardState, RenderGate, RenderPhase, ValidationError};
use crate::draw::font::await_fonts;
use std::cell::{Ref, RefCell};
use std::sync::Arc;
use thiserror::Error;

/// Why a generate request produced no card.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A card is already being generated")]
    Busy,

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Drives one renderer from a single-threaded async context.
///
/// Requests arriving while a render is in flight are rejected with
/// [`SessionError::Busy`] rather than queued.
#[derive(Debug)]
pub struct CardSession {
    renderer: RefCell<CardRenderer>,
    gate: RenderGate,
}

impl CardSession {
    pub fn new(config: Arc<RenderConfig>) -> Result<Self, RenderError> {
        Ok(Self {
            renderer: RefCell::new(CardRenderer::new(config)?),
            gate: RenderGate::new(),
        })
    }

    /// Busy indicator: `Rendering` between admission and completion.
    pub fn phase(&self) -> RenderPhase {
        self.gate.phase()
    }

    /// Validates `raw`, then renders a card for it.
    ///
    /// Blank input is rejected before the gate is touched, so it never
    /// reaches the renderer. The font check is best effort: missing fonts
    /// only degrade the text and the render goes ahead after the timeout.
    pub async fn generate(&self, raw: &str) -> Result<CardName, SessionError> {
        let name = CardName::parse(raw)?;
        let _ticket = self.gate.try_begin().ok_or(SessionError::Busy)?;
        log::debug!("Generating card for '{}'", name);

        // Let observers see the busy phase before any work happens.
        tokio::task::yield_now().await;

        let (families, timeout) = {
            let renderer = self.renderer.borrow();
            (renderer.config().font_families(), renderer.config().font_timeout)
        };
        let missing = await_fonts(&families, timeout).await;
        if !missing.is_empty() {
            log::debug!("Rendering with fallback fonts for {:?}", missing);
        }

        self.renderer.borrow_mut().render(&name)?;
        Ok(name)
    }

    /// The name of the card on the surface.
    pub fn state(&self) -> CardState {
        self.renderer.borrow().state().clone()
    }

    /// Read access to the renderer, e.g. for export.
    ///
    /// Do not hold the guard across an `.await` on `generate`.
    pub fn renderer(&self) -> Ref<'_, CardRenderer> {
        self.renderer.borrow()
    }
}
