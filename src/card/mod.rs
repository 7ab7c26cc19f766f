//! Card generation: the validated name, the renderer and the async session.

pub mod renderer;
pub mod session;
pub mod state;

pub use renderer::{CardRenderer, MoonPlacement, RenderConfig, RenderError};
pub use session::{CardSession, SessionError};
pub use state::{CardName, CardState, RenderGate, RenderPhase, ValidationError};
