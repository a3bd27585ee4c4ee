//! Infrastructure layer: command-line configuration and log output.
//!
//! The terminal belongs to the UI, so diagnostics go to a log file.

pub mod config;
pub mod logging;

pub use config::*;
pub use logging::*;
