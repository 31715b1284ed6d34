//! Drawing-surface collaborator.
//!
//! The driver never touches a graphics API directly. It only reads the surface's
//! displayed size, writes its backing-buffer size and checks at startup that a
//! rendering context could be acquired.

mod surface;

pub use surface::DrawingSurface;
