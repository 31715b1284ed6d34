//! Moonloop engine crate.
//!
//! Drives a host-provided renderer at the display's refresh cadence: frame pacing,
//! viewport synchronization and input forwarding. The renderer itself is external
//! and only seen through the [`core::Renderer`] capability set.

pub mod coords;
pub mod core;
pub mod device;
pub mod driver;
pub mod error;
pub mod host;
pub mod input;
pub mod logging;
pub mod time;

pub use error::DriverError;
