//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily on first use, rebuilding the pipeline if the surface format changes.
//!
//! Convention:
//! - particle positions are clip-space (`[-1, 1]²`, +Y up)
//! - point sizes are physical pixels, converted with a viewport uniform

mod ctx;
pub mod points;

pub use ctx::{RenderCtx, RenderTarget};
