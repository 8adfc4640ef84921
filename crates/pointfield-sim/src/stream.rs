//! Streaming spawner over a fixed-capacity ring of [`StreamRecord`]s.
//!
//! New particles arrive in fixed-size chunks on a frame cadence. Each chunk is
//! written at the ring cursor and the cursor moves on; when it reaches the end
//! of the buffer it starts over at slot 0 and the oldest chunk is replaced.
//! Nothing checks whether the replaced particles have finished animating.
//! With the default constants a particle is replaced about 5000 chunks
//! (~83 minutes at 60 fps) after birth, long after it has reached its target.

use rand::Rng;

use crate::error::ConfigError;
use crate::record::{StreamRecord, RECORD_STRIDE};
use crate::ring::{ChunkSlot, RingCursor};
use crate::sampling::{SpawnDistributions, SpawnSampler};

/// Streaming demo configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// Ring capacity in records. Must be a multiple of `chunk_size`.
    pub capacity: u32,
    /// Records per spawned chunk.
    pub chunk_size: u32,
    /// Frames between spawns after the initial one.
    pub spawn_interval: u64,
    /// Spawning stops for good once the active count is no longer below this.
    pub population_limit: u32,
    /// On-screen point diameter in physical pixels.
    pub point_size: f32,
    pub spawn: SpawnDistributions,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            capacity: 50_000,
            chunk_size: 10,
            spawn_interval: 60,
            population_limit: 50_000,
            point_size: 10.0,
            spawn: SpawnDistributions::default(),
        }
    }
}

/// Counters that drive the ring buffer.
///
/// `active` lags the cursor by one chunk: after writing chunk `k` it holds
/// `k * chunk_size`, so `active + chunk_size` covers everything written so
/// far. It only moves while `active + chunk_size < capacity`; later wraparound
/// writes keep advancing the cursor without touching it.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    ring: RingCursor,
    active: u32,
    population_limit: u32,
    spawn_interval: u64,
}

impl StreamState {
    pub fn new(config: &StreamConfig) -> Result<Self, ConfigError> {
        if config.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        Ok(Self {
            ring: RingCursor::new(config.capacity, config.chunk_size)?,
            active: 0,
            population_limit: config.population_limit,
            spawn_interval: config.spawn_interval,
        })
    }

    #[inline]
    pub fn ring(&self) -> &RingCursor {
        &self.ring
    }

    #[inline]
    pub fn active_count(&self) -> u32 {
        self.active
    }

    /// Whether the population ceiling still admits new chunks.
    #[inline]
    pub fn accepting(&self) -> bool {
        self.active < self.population_limit
    }

    /// Cadence gate. Tick 0 is covered by the spawn made before the first frame.
    #[inline]
    pub fn spawn_due(&self, tick: u64) -> bool {
        tick != 0 && tick % self.spawn_interval == 0
    }

    /// Records the renderer should draw: the active count plus the chunk in flight.
    #[inline]
    pub fn draw_count(&self) -> u32 {
        let count = self.active + self.ring.chunk_size();
        debug_assert!(count <= self.ring.capacity());
        count
    }

    /// Claims the next chunk if the population ceiling allows it.
    pub fn claim(&mut self) -> Option<ChunkSlot> {
        if !self.accepting() {
            return None;
        }

        let wraps_before = self.ring.wraps();
        let slot = self.ring.claim();
        let chunk_size = self.ring.chunk_size();

        if self.active + chunk_size < self.ring.capacity() {
            self.active = slot.index * chunk_size;
        }

        if self.ring.wraps() != wraps_before {
            log::info!(
                "ring buffer full after {} chunks; next chunk overwrites slot 0 (wrap {})",
                self.ring.total_chunks(),
                self.ring.wraps()
            );
        }
        if !self.accepting() {
            log::info!(
                "population limit {} reached at {} active particles; spawning stopped",
                self.population_limit,
                self.active
            );
        }

        Some(slot)
    }
}

/// A chunk ready for upload into the GPU ring buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedChunk {
    pub slot: ChunkSlot,
    /// Destination offset in bytes (`slot.first_record * RECORD_STRIDE`).
    pub byte_offset: u64,
    pub records: Vec<StreamRecord>,
}

impl SpawnedChunk {
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }
}

/// Spawner state plus its sampler. Owned by the frame driver.
#[derive(Debug, Clone)]
pub struct StreamField {
    state: StreamState,
    sampler: SpawnSampler,
    point_size: f32,
}

impl StreamField {
    pub fn new(config: StreamConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: StreamState::new(&config)?,
            sampler: SpawnSampler::new(&config.spawn)?,
            point_size: config.point_size,
        })
    }

    #[inline]
    pub fn state(&self) -> &StreamState {
        &self.state
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    #[inline]
    pub fn draw_count(&self) -> u32 {
        self.state.draw_count()
    }

    /// Spawns one chunk born at `time`, ignoring the frame cadence.
    ///
    /// Returns `None` once the population ceiling has closed.
    pub fn spawn<R: Rng + ?Sized>(&mut self, time: f32, rng: &mut R) -> Option<SpawnedChunk> {
        let slot = self.state.claim()?;
        let records = self.sampler.chunk(time, slot.len, rng);
        debug_assert_eq!(records.len() as u32, slot.len);

        log::debug!(
            "spawned chunk {} ({} records) at t={time:.3}, byte offset {}",
            slot.index,
            slot.len,
            slot.byte_offset(RECORD_STRIDE)
        );

        Some(SpawnedChunk {
            slot,
            byte_offset: slot.byte_offset(RECORD_STRIDE),
            records,
        })
    }

    /// Per-frame update: spawns when `tick` hits the cadence.
    pub fn on_frame<R: Rng + ?Sized>(
        &mut self,
        time: f32,
        tick: u64,
        rng: &mut R,
    ) -> Option<SpawnedChunk> {
        if !self.state.spawn_due(tick) {
            return None;
        }
        self.spawn(time, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(config: StreamConfig) -> (StreamField, StdRng) {
        (StreamField::new(config).unwrap(), StdRng::seed_from_u64(42))
    }

    fn small(capacity: u32, chunk_size: u32) -> StreamConfig {
        StreamConfig {
            capacity,
            chunk_size,
            population_limit: capacity,
            ..Default::default()
        }
    }

    // ── configuration ─────────────────────────────────────────────────────

    #[test]
    fn rejects_zero_interval() {
        let config = StreamConfig { spawn_interval: 0, ..Default::default() };
        assert_eq!(StreamField::new(config).unwrap_err(), ConfigError::ZeroSpawnInterval);
    }

    #[test]
    fn rejects_misaligned_capacity() {
        assert!(matches!(
            StreamField::new(small(95, 10)),
            Err(ConfigError::CapacityNotChunkAligned { .. })
        ));
    }

    // ── spawning ──────────────────────────────────────────────────────────

    #[test]
    fn every_chunk_has_chunk_size_records() {
        let (mut f, mut rng) = field(small(70, 7));
        for i in 0..25 {
            let chunk = f.spawn(i as f32, &mut rng).unwrap();
            assert_eq!(chunk.records.len(), 7);
            assert_eq!(chunk.bytes().len() as u64, 7 * RECORD_STRIDE);
            assert_eq!(chunk.byte_offset, chunk.slot.first_record as u64 * RECORD_STRIDE);
        }
    }

    #[test]
    fn initial_spawn_then_cadence() {
        let (mut f, mut rng) = field(StreamConfig::default());

        let first = f.spawn(0.0, &mut rng).unwrap();
        assert_eq!(first.byte_offset, 0);
        assert_eq!(first.records.len(), 10);
        assert!(first.records.iter().all(|r| r.birth == 0.0));

        // Tick 0 is already covered, ticks 1..59 are off-cadence.
        for tick in 0..60 {
            assert!(f.on_frame(tick as f32 / 60.0, tick, &mut rng).is_none());
        }

        let second = f.on_frame(1.0, 60, &mut rng).unwrap();
        assert_eq!(second.byte_offset, 10 * RECORD_STRIDE);
        assert_eq!(second.byte_offset, 440);
        assert!(second.records.iter().all(|r| r.birth == 1.0));

        assert!(f.on_frame(1.5, 90, &mut rng).is_none());
        assert_eq!(f.on_frame(2.0, 120, &mut rng).unwrap().slot.index, 2);
    }

    #[test]
    fn wraps_once_after_capacity_worth_of_spawns() {
        let (mut f, mut rng) = field(StreamConfig::default());

        for i in 0..5000u32 {
            let chunk = f.spawn(i as f32, &mut rng).unwrap();
            assert_eq!(chunk.slot.index, i);
            assert!(f.state().ring().chunk() < f.state().ring().total_chunks());
        }

        assert_eq!(f.state().ring().chunk(), 0);
        assert_eq!(f.state().ring().wraps(), 1);

        let reused = f.spawn(5000.0, &mut rng).unwrap();
        assert_eq!(reused.byte_offset, 0);
    }

    // ── active count / draw count ─────────────────────────────────────────

    #[test]
    fn draw_count_covers_in_flight_chunk() {
        let (mut f, mut rng) = field(small(50, 10));
        f.spawn(0.0, &mut rng);
        assert_eq!(f.state().active_count(), 0);
        assert_eq!(f.draw_count(), 10);

        f.spawn(1.0, &mut rng);
        assert_eq!(f.state().active_count(), 10);
        assert_eq!(f.draw_count(), 20);
    }

    #[test]
    fn active_count_freezes_while_cursor_keeps_wrapping() {
        let (mut f, mut rng) = field(small(50, 10));
        for i in 0..5 {
            f.spawn(i as f32, &mut rng);
        }
        assert_eq!(f.state().active_count(), 40);
        assert_eq!(f.draw_count(), 50);

        // Default ceiling equals capacity and the lagging count never reaches
        // it, so streaming continues over the oldest chunks.
        for i in 5..23 {
            let chunk = f.spawn(i as f32, &mut rng).unwrap();
            assert_eq!(chunk.slot.index, (i % 5) as u32);
            assert_eq!(f.state().active_count(), 40);
            assert_eq!(f.draw_count(), 50);
        }
        assert_eq!(f.state().ring().wraps(), 4);
    }

    #[test]
    fn population_limit_stops_spawning_for_good() {
        let config = StreamConfig { population_limit: 30, ..small(100, 10) };
        let (mut f, mut rng) = field(config);

        let mut spawned = 0;
        for tick in 0..2000u64 {
            let chunk = if tick == 0 {
                f.spawn(0.0, &mut rng)
            } else {
                f.on_frame(tick as f32, tick, &mut rng)
            };
            spawned += chunk.is_some() as u32;
        }

        // Chunks 0..=3 are written; after chunk 3 the lagging count hits 30.
        assert_eq!(spawned, 4);
        assert!(!f.state().accepting());
        assert_eq!(f.state().active_count(), 30);
        assert_eq!(f.draw_count(), 40);
        assert_eq!(f.state().ring().wraps(), 0);
    }

    #[test]
    fn draw_count_never_exceeds_capacity() {
        let (mut f, mut rng) = field(small(30, 10));
        for i in 0..100 {
            f.spawn(i as f32, &mut rng);
            assert!(f.draw_count() <= 30);
        }
    }
}
