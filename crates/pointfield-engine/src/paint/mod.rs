//! Paint model shared between demos and renderers.

pub mod color;

pub use color::Color;
