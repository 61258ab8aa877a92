//! Platform abstraction layer
//!
//! Thin host glue around the simulation:
//! - Frame timing (clamped deltas) and the animation-frame loop
//! - Keyboard/touch translation into commands
//! - The JS-facing game handle (wasm only)

pub mod frame_loop;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame_loop::FrameClock;
pub use input::{SwipeTracker, classify_swipe, command_for_key};
