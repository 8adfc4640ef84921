use bytemuck::{Pod, Zeroable};

/// One streamed particle as laid out in the GPU ring buffer.
///
/// Layout (44 bytes, tightly packed `f32`s):
///
///  offset  0  start     [f32; 2]
///  offset  8  target    [f32; 2]
///  offset 16  velocity  [f32; 2]
///  offset 24  birth     f32
///  offset 28  color     [f32; 4]   linear RGBA
///
/// `velocity.x` is not a displacement per frame. The shader divides elapsed
/// time by `|velocity.x|`, so the field is the inverse of a progress rate:
/// its magnitude is the number of seconds from `start` to `target`. See
/// [`crate::motion`]. `velocity.y` is carried but unused.
///
/// Records are written once when their chunk is spawned and never mutated.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct StreamRecord {
    pub start: [f32; 2],
    pub target: [f32; 2],
    pub velocity: [f32; 2],
    pub birth: f32,
    pub color: [f32; 4],
}

/// Byte stride between consecutive records in the GPU buffer.
pub const RECORD_STRIDE: u64 = std::mem::size_of::<StreamRecord>() as u64;
