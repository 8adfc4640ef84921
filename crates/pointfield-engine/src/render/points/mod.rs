//! Point-sprite renderers.
//!
//! - [`StreamedPointRenderer`]: fixed-capacity ring buffer, partial writes,
//!   motion computed on the GPU.
//! - [`DynamicPointRenderer`]: positions simulated on the host and replaced
//!   wholesale each frame.

mod common;

pub mod dynamic;
pub mod streamed;

pub use dynamic::DynamicPointRenderer;
pub use streamed::StreamedPointRenderer;
