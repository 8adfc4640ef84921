use std::ops::Range;

use crate::error::ConfigError;

/// Slot range claimed for one chunk write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChunkSlot {
    /// Chunk index in `[0, total_chunks)`.
    pub index: u32,
    /// First record slot covered by this chunk.
    pub first_record: u32,
    /// Number of records in the chunk.
    pub len: u32,
}

impl ChunkSlot {
    /// Byte offset of the chunk inside a buffer of `stride`-byte records.
    #[inline]
    pub fn byte_offset(&self, stride: u64) -> u64 {
        self.first_record as u64 * stride
    }

    #[inline]
    pub fn byte_range(&self, stride: u64) -> Range<u64> {
        let start = self.byte_offset(stride);
        start..start + self.len as u64 * stride
    }
}

/// Write cursor over a fixed-capacity ring of record slots.
///
/// The cursor moves in whole chunks. Once the last chunk has been claimed it
/// returns to chunk 0, and the next claim overwrites the oldest data. Buffer
/// contents are never inspected: callers accept that slots near the cursor are
/// reused whether or not the particles in them have finished animating.
///
/// Invariant: `0 <= chunk < total_chunks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingCursor {
    chunk_size: u32,
    total_chunks: u32,
    chunk: u32,
    wraps: u64,
}

impl RingCursor {
    /// Creates a cursor at chunk 0.
    ///
    /// `capacity` is in records and must be a positive multiple of `chunk_size`.
    pub fn new(capacity: u32, chunk_size: u32) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if capacity % chunk_size != 0 {
            return Err(ConfigError::CapacityNotChunkAligned { capacity, chunk_size });
        }

        Ok(Self {
            chunk_size,
            total_chunks: capacity / chunk_size,
            chunk: 0,
            wraps: 0,
        })
    }

    /// Chunk index the next claim will write to.
    #[inline]
    pub fn chunk(&self) -> u32 {
        self.chunk
    }

    #[inline]
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    #[inline]
    pub fn total_chunks(&self) -> u32 {
        self.total_chunks
    }

    /// Capacity in records.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.total_chunks * self.chunk_size
    }

    /// Number of times the cursor has returned to chunk 0.
    #[inline]
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Claims the chunk under the cursor and advances by one chunk.
    pub fn claim(&mut self) -> ChunkSlot {
        let slot = ChunkSlot {
            index: self.chunk,
            first_record: self.chunk * self.chunk_size,
            len: self.chunk_size,
        };

        self.chunk += 1;
        if self.chunk >= self.total_chunks {
            self.chunk = 0;
            self.wraps += 1;
        }

        debug_assert!(slot.first_record + slot.len <= self.capacity());
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn rejects_zero_chunk_size() {
        assert_eq!(RingCursor::new(100, 0), Err(ConfigError::ZeroChunkSize));
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(RingCursor::new(0, 10), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn rejects_partial_last_chunk() {
        assert_eq!(
            RingCursor::new(105, 10),
            Err(ConfigError::CapacityNotChunkAligned { capacity: 105, chunk_size: 10 })
        );
    }

    // ── claim ─────────────────────────────────────────────────────────────

    #[test]
    fn claims_consecutive_chunks() {
        let mut ring = RingCursor::new(50, 10).unwrap();
        let a = ring.claim();
        let b = ring.claim();
        assert_eq!(a, ChunkSlot { index: 0, first_record: 0, len: 10 });
        assert_eq!(b, ChunkSlot { index: 1, first_record: 10, len: 10 });
        assert_eq!(b.byte_offset(44), 440);
        assert_eq!(b.byte_range(44), 440..880);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut ring = RingCursor::new(40, 10).unwrap();
        for _ in 0..23 {
            let slot = ring.claim();
            assert!(slot.index < ring.total_chunks());
            assert!(ring.chunk() < ring.total_chunks());
            assert!(slot.first_record + slot.len <= ring.capacity());
        }
    }

    #[test]
    fn wraps_after_total_chunks_claims() {
        let mut ring = RingCursor::new(40, 10).unwrap();
        for _ in 0..3 {
            ring.claim();
        }
        assert_eq!(ring.chunk(), 3);
        assert_eq!(ring.wraps(), 0);

        ring.claim();
        assert_eq!(ring.chunk(), 0);
        assert_eq!(ring.wraps(), 1);

        // Next claim reuses the oldest slots.
        assert_eq!(ring.claim().first_record, 0);
    }

    #[test]
    fn single_chunk_ring_wraps_every_claim() {
        let mut ring = RingCursor::new(10, 10).unwrap();
        for n in 1..=5 {
            assert_eq!(ring.claim().index, 0);
            assert_eq!(ring.wraps(), n);
        }
    }
}
