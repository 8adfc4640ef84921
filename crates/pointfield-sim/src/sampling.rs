use std::ops::Range;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::color::hsl_to_linear_rgba;
use crate::error::ConfigError;
use crate::record::StreamRecord;

/// Mean and standard deviation of a normal distribution.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NormalParams {
    pub mean: f32,
    pub std_dev: f32,
}

impl NormalParams {
    #[inline]
    pub const fn new(mean: f32, std_dev: f32) -> Self {
        Self { mean, std_dev }
    }

    pub(crate) fn build(self, name: &'static str) -> Result<Normal<f32>, ConfigError> {
        if !self.mean.is_finite() {
            return Err(ConfigError::distribution(name, format!("non-finite mean {}", self.mean)));
        }
        if self.std_dev.is_nan() || self.std_dev < 0.0 {
            return Err(ConfigError::distribution(
                name,
                format!("standard deviation {} is negative or NaN", self.std_dev),
            ));
        }
        Normal::new(self.mean, self.std_dev)
            .map_err(|e| ConfigError::distribution(name, e.to_string()))
    }
}

/// Distributions used to populate a spawned chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnDistributions {
    /// Start position, drawn independently per axis.
    pub position: NormalParams,
    /// Shared destination of every particle.
    pub target: [f32; 2],
    /// Velocity, drawn independently per axis. `|x|` is the travel time in seconds.
    pub velocity: NormalParams,
    /// Hue range in degrees, sampled uniformly.
    pub hue_degrees: Range<f32>,
    pub saturation: f32,
    /// Lightness is uniform in `[0, 1)` and then raised to at least this value.
    pub lightness_floor: f32,
}

impl Default for SpawnDistributions {
    fn default() -> Self {
        Self {
            position: NormalParams::new(0.001, 0.1),
            target: [1.0, 0.0],
            velocity: NormalParams::new(0.1, 0.5),
            hue_degrees: 0.0..60.0,
            saturation: 1.0,
            lightness_floor: 0.2,
        }
    }
}

/// Validated sampler built from [`SpawnDistributions`].
#[derive(Debug, Clone)]
pub struct SpawnSampler {
    position: Normal<f32>,
    velocity: Normal<f32>,
    target: [f32; 2],
    hue_degrees: Range<f32>,
    saturation: f32,
    lightness_floor: f32,
}

impl SpawnSampler {
    pub fn new(dists: &SpawnDistributions) -> Result<Self, ConfigError> {
        let hue = dists.hue_degrees.clone();
        if !(hue.start.is_finite() && hue.end.is_finite() && hue.start < hue.end) {
            return Err(ConfigError::distribution(
                "hue",
                format!("empty or non-finite range {}..{}", hue.start, hue.end),
            ));
        }
        if !dists.target.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::distribution("target", "non-finite coordinate"));
        }
        if !dists.saturation.is_finite() {
            return Err(ConfigError::distribution("saturation", "non-finite value"));
        }
        if !dists.lightness_floor.is_finite() {
            return Err(ConfigError::distribution("lightness", "non-finite floor"));
        }

        Ok(Self {
            position: dists.position.build("position")?,
            velocity: dists.velocity.build("velocity")?,
            target: dists.target,
            hue_degrees: hue,
            saturation: dists.saturation.clamp(0.0, 1.0),
            lightness_floor: dists.lightness_floor.clamp(0.0, 1.0),
        })
    }

    pub fn position<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 2] {
        [self.position.sample(rng), self.position.sample(rng)]
    }

    pub fn velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 2] {
        [self.velocity.sample(rng), self.velocity.sample(rng)]
    }

    /// Random warm color as opaque linear RGBA.
    pub fn color<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 4] {
        let hue = rng.random_range(self.hue_degrees.clone());
        let lightness = rng.random::<f32>().max(self.lightness_floor);
        hsl_to_linear_rgba(hue, self.saturation, lightness)
    }

    /// Produces `count` fresh records born at `birth`.
    pub fn chunk<R: Rng + ?Sized>(&self, birth: f32, count: u32, rng: &mut R) -> Vec<StreamRecord> {
        (0..count)
            .map(|_| StreamRecord {
                start: self.position(rng),
                target: self.target,
                velocity: self.velocity(rng),
                birth,
                color: self.color(rng),
            })
            .collect()
    }
}
