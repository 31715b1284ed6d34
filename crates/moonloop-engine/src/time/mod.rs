//! Time subsystem.
//!
//! Provides the frame clock and pacing policy used by the render loop. Timestamps
//! are plain `f64` milliseconds so the same clock works with `Instant` on native
//! targets and `performance.now()` in the browser.
//!
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick(now)` once per scheduled frame; `None` means the frame was paced out

mod frame_clock;
mod pacing;
mod source;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacing::FramePacing;
pub use source::TimeSource;

#[cfg(not(target_arch = "wasm32"))]
pub use source::MonotonicClock;
