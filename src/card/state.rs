//! Validated name, current card state and the render gate.

use std::cell::Cell;
use std::fmt;
use thiserror::Error;

/// Input rejected before anything is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a name")]
    EmptyName,
}

/// A trimmed, non-empty name.
///
/// Otherwise opaque: right-to-left scripts, combining marks and emoji are
/// all accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardName(String);

impl CardName {
    /// Trims surrounding whitespace and rejects what is left if it is empty.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the card currently on the surface.
///
/// Empty until the first successful render, then kept until the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardState {
    name: Option<CardName>,
}

impl CardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&CardName> {
        self.name.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub(crate) fn set(&mut self, name: CardName) {
        self.name = Some(name);
    }
}

/// Whether a card render is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPhase {
    #[default]
    Idle,
    Rendering,
}

/// Admits one render at a time.
#[derive(Debug, Default)]
pub struct RenderGate {
    phase: Cell<RenderPhase>,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase.get()
    }

    /// Moves to `Rendering`, or returns `None` if a render already holds the gate.
    ///
    /// The gate returns to `Idle` when the ticket is dropped, whether the
    /// render succeeded or failed.
    pub fn try_begin(&self) -> Option<RenderTicket<'_>> {
        match self.phase.get() {
            RenderPhase::Rendering => None,
            RenderPhase::Idle => {
                self.phase.set(RenderPhase::Rendering);
                Some(RenderTicket { gate: self })
            }
        }
    }
}

/// Held for the duration of one render.
#[derive(Debug)]
pub struct RenderTicket<'a> {
    gate: &'a RenderGate,
}

impl Drop for RenderTicket<'_> {
    fn drop(&mut self) {
        self.gate.phase.set(RenderPhase::Idle);
    }
}
