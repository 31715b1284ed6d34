//! Render loop driver.
//!
//! Owns frame timing and viewport state, forwards input, and calls the renderer
//! once per scheduled frame. Hosts (native window, browser, manual loop) provide
//! the timestamps and the "next frame" scheduling primitive.

mod config;
mod control;
mod render_loop;

pub use config::LoopConfig;
pub use control::{FrameRateSink, StopHandle};
pub use render_loop::{RenderLoop, StepOutcome};
