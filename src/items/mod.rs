//! Equipped items and the bonus aggregate they feed into battles.

pub mod equipment;
pub mod types;

pub use equipment::*;
pub use types::*;
