//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the render loop and the
//! renderer it drives. The renderer is opaque: any type implementing the five
//! operations of [`Renderer`] can be driven, in-process object or remote stub.

mod renderer;

pub use renderer::{RenderTime, Renderer};
