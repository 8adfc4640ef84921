use std::fmt;

/// Rejected simulation configuration.
///
/// Raised when a config struct is turned into live state; the per-frame paths
/// never fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Chunk size of zero records.
    ZeroChunkSize,
    /// Ring capacity of zero records.
    ZeroCapacity,
    /// Capacity must hold a whole number of chunks.
    CapacityNotChunkAligned { capacity: u32, chunk_size: u32 },
    /// Spawn cadence of zero frames.
    ZeroSpawnInterval,
    /// A sampling parameter was rejected (negative deviation, empty range, NaN...).
    InvalidDistribution { name: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn distribution(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDistribution { name, reason: reason.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroChunkSize => write!(f, "chunk size must be at least one record"),
            Self::ZeroCapacity => write!(f, "ring capacity must be at least one record"),
            Self::CapacityNotChunkAligned { capacity, chunk_size } => write!(
                f,
                "ring capacity {capacity} is not a multiple of chunk size {chunk_size}"
            ),
            Self::ZeroSpawnInterval => write!(f, "spawn interval must be at least one frame"),
            Self::InvalidDistribution { name, reason } => {
                write!(f, "invalid `{name}` distribution: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
