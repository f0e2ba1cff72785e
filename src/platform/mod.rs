//! Platform layer
//!
//! Browser/native differences:
//! - Keyboard mapping to held controls
//! - The wasm entry point and JS-facing game handle

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Control, Controls};
