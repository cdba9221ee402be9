//! Deterministic 2D noise sampling.

use noise::{NoiseFn, Perlin};
use voxterra_core::constants::{BIOME_NOISE_OFFSET, DEFAULT_NOISE_SCALE};

use crate::WorldSeed;

/// Frequency and coordinate offset for one noise channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSettings {
    /// Multiplier applied to grid coordinates before sampling.
    pub scale: f64,
    /// Added to both scaled coordinates.
    pub offset: f64,
}

impl NoiseSettings {
    /// Height channel: sampled at the grid origin.
    pub const fn height(scale: f64) -> Self {
        Self { scale, offset: 0.0 }
    }

    /// Biome channel: shifted away from the height channel.
    pub const fn biome(scale: f64) -> Self {
        Self {
            scale,
            offset: BIOME_NOISE_OFFSET,
        }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self::height(DEFAULT_NOISE_SCALE)
    }
}

/// Stateless Perlin sampler returning values in [0, 1].
///
/// The same seed and coordinates always produce the same value.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Create a noise field for the given seed.
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample at `(x * scale + offset, z * scale + offset)`.
    ///
    /// Perlin output in [-1, 1] is remapped to [0, 1].
    pub fn sample(&self, x: f64, z: f64, scale: f64, offset: f64) -> f64 {
        let raw = self.perlin.get([x * scale + offset, z * scale + offset]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Sample a configured channel at grid coordinates.
    #[inline]
    pub fn sample_channel(&self, settings: NoiseSettings, x: i32, z: i32) -> f64 {
        self.sample(f64::from(x), f64::from(z), settings.scale, settings.offset)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0)
    }
}
