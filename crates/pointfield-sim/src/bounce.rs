use rand::Rng;
use rand_distr::Distribution;

use crate::error::ConfigError;
use crate::sampling::NormalParams;

/// Bouncing demo configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BounceConfig {
    pub count: usize,
    /// Initial position, drawn independently per axis.
    pub position: NormalParams,
    /// Per-frame displacement, drawn independently per axis.
    pub velocity: NormalParams,
    /// On-screen point diameter in physical pixels.
    pub point_size: f32,
    /// Straight RGBA fill.
    pub color: [f32; 4],
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            position: NormalParams::new(0.0, 0.1),
            velocity: NormalParams::new(0.0001, 0.001),
            point_size: 9.0,
            color: [0.0, 1.0, 0.0, 1.0],
        }
    }
}

/// A particle inside the `[-1, 1]²` clip-space box.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BouncingParticle {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
}

impl BouncingParticle {
    /// Advances one frame.
    ///
    /// An axis at or beyond `±1` has its velocity negated before the move.
    /// The position is not clamped back inside, so a particle may sit outside
    /// the box for a frame before the flipped velocity brings it back.
    #[inline]
    pub fn step(&mut self) {
        for axis in 0..2 {
            let p = self.position[axis];
            if p >= 1.0 || p <= -1.0 {
                self.velocity[axis] = -self.velocity[axis];
            }
        }
        self.position[0] += self.velocity[0];
        self.position[1] += self.velocity[1];
    }
}

/// Host-side particle set, re-uploaded in full every frame.
#[derive(Debug, Clone, Default)]
pub struct BounceField {
    particles: Vec<BouncingParticle>,
}

impl BounceField {
    pub fn new<R: Rng + ?Sized>(config: &BounceConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let position = config.position.build("position")?;
        let velocity = config.velocity.build("velocity")?;

        let particles = (0..config.count)
            .map(|_| BouncingParticle {
                position: [position.sample(rng), position.sample(rng)],
                velocity: [velocity.sample(rng), velocity.sample(rng)],
            })
            .collect();

        Ok(Self { particles })
    }

    pub fn from_particles(particles: Vec<BouncingParticle>) -> Self {
        Self { particles }
    }

    #[inline]
    pub fn particles(&self) -> &[BouncingParticle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.step();
        }
    }

    /// Rebuilds the per-vertex position array. Reuses `out`'s allocation.
    pub fn write_positions(&self, out: &mut Vec<[f32; 2]>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| p.position));
    }
}
