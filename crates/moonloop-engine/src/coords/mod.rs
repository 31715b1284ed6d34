//! Drawing-surface sizes.
//!
//! Sizes are whole pixels of the surface's backing buffer. Zero-area sizes can be
//! observed (minimized windows) but are never applied to a viewport.

mod viewport;

pub use viewport::{SurfaceSize, ViewportState};
