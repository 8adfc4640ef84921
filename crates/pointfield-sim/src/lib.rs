//! Simulation core for the **pointfield** demos.
//!
//! Everything here is plain CPU data: GPU upload and drawing live in
//! `pointfield-engine`. The crate owns the particle record layouts, the
//! ring-buffer write cursor, the spawner, and the bounce step.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`record`] | `StreamRecord` (44-byte GPU record), `RECORD_STRIDE` |
//! | [`ring`] | `RingCursor`, `ChunkSlot` |
//! | [`stream`] | `StreamConfig`, `StreamState`, `StreamField`, `SpawnedChunk` |
//! | [`sampling`] | `NormalParams`, `SpawnDistributions`, `SpawnSampler` |
//! | [`color`] | HSL → sRGB → linear conversion |
//! | [`motion`] | CPU mirror of the streamed-particle motion rule |
//! | [`bounce`] | `BouncingParticle`, `BounceField`, `BounceConfig` |
//! | [`error`] | `ConfigError` |
//!
//! # Quick start
//!
//! ```rust
//! use pointfield_sim::{StreamConfig, StreamField};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut field = StreamField::new(StreamConfig::default()).unwrap();
//!
//! let chunk = field.spawn(0.0, &mut rng).unwrap();
//! assert_eq!(chunk.byte_offset, 0);
//! assert_eq!(chunk.records.len(), 10);
//! assert_eq!(field.draw_count(), 10);
//! ```

pub mod bounce;
pub mod color;
pub mod error;
pub mod motion;
pub mod record;
pub mod ring;
pub mod sampling;
pub mod stream;

pub use bounce::{BounceConfig, BounceField, BouncingParticle};
pub use error::ConfigError;
pub use record::{StreamRecord, RECORD_STRIDE};
pub use ring::{ChunkSlot, RingCursor};
pub use sampling::{NormalParams, SpawnDistributions, SpawnSampler};
pub use stream::{SpawnedChunk, StreamConfig, StreamField, StreamState};
