//! Hosts that feed timestamps into a [`RenderLoop`](crate::driver::RenderLoop).
//!
//! - `manual`: explicit timestamps, for headless runs and tests
//! - `native`: a winit window, one redraw per display refresh
//! - `web`: a canvas driven by `requestAnimationFrame`

mod manual;
mod scheduler;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::{run_manual, ManualRun, ManualScheduler};
pub use scheduler::FrameScheduler;
