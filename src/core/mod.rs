//! Engine-wide constants and configuration.

pub mod config;
pub mod constants;

pub use config::*;
pub use constants::*;
