//! Logging utilities.
//!
//! Centralizes logger initialization. The engine itself only talks to the `log`
//! facade; native builds install `env_logger`, browser builds forward records to
//! the developer console.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(not(target_arch = "wasm32"))]
mod init;

#[cfg(target_arch = "wasm32")]
pub use console::{init_logging, LoggingConfig};
#[cfg(not(target_arch = "wasm32"))]
pub use init::{init_logging, LoggingConfig};
