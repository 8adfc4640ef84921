//! Time subsystem.
//!
//! One `FrameClock` per window; `tick()` once per presented frame yields the
//! elapsed time and frame counter handed to the frame callback.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
