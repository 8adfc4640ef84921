//! pointfield engine crate.
//!
//! Owns the window loop, the wgpu device/surface, frame timing, and the
//! point-sprite renderers that draw `pointfield-sim` state.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
