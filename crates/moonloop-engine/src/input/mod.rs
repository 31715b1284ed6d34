//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit or DOM types.
//! Host code is responsible for translating platform events into `InputEvent`s.

mod state;
mod types;

pub use state::KeyboardState;
pub use types::{InputEvent, Key};
