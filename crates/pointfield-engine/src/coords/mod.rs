//! Coordinate types shared between the runtime and renderers.
//!
//! Particle positions are already clip-space (`[-1, 1]²`, +Y up); only the
//! viewport size is needed to turn pixel point sizes into clip-space extents.

mod viewport;

pub use viewport::Viewport;
