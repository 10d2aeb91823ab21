//! Procedural terrain generation.

use std::fmt;

use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};
use voxelwalk_core::constants::CHUNK_HEIGHT_I32;
use voxelwalk_core::{BlockKind, Error, Result};

use crate::WorldSeed;

/// Deterministic 2D noise in `[-1, 1]`.
pub trait NoiseSource {
    /// Sample the noise field at `(x, z)`.
    fn sample(&self, x: f64, z: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// Seeded simplex noise from the `noise` crate.
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    inner: Simplex,
}

impl SimplexNoise {
    /// Create a simplex field for the given seed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(seed: WorldSeed) -> Self {
        // Fold the high bits in so seeds differing only above bit 32 still diverge.
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            inner: Simplex::new(folded),
        }
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, z: f64) -> f64 {
        self.inner.get([x, z]).clamp(-1.0, 1.0)
    }
}

/// Terrain generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Seed for noise generation.
    pub seed: WorldSeed,
    /// Scale applied to world coordinates before sampling noise.
    pub frequency: f64,
    /// Lowest possible column height.
    pub base_height: i32,
    /// Height gained per unit of `(noise + 1)`.
    pub height_amplitude: f64,
    /// Number of dirt blocks between the grass surface and stone.
    pub dirt_depth: i32,
    /// Empty cells below this Y are filled with water.
    pub sea_level: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 0.03,
            base_height: 5,
            height_amplitude: 5.0,
            dirt_depth: 3,
            sea_level: 4,
        }
    }
}

impl TerrainConfig {
    /// Set the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: WorldSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the parameters describe terrain that fits in a chunk.
    pub fn validate(&self) -> Result<()> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "terrain frequency must be positive, got {}",
                self.frequency
            )));
        }
        if self.base_height < 1 || self.base_height > CHUNK_HEIGHT_I32 {
            return Err(Error::InvalidConfig(format!(
                "terrain base height {} outside 1..={CHUNK_HEIGHT_I32}",
                self.base_height
            )));
        }
        if !(self.height_amplitude.is_finite() && self.height_amplitude >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "terrain height amplitude must be non-negative, got {}",
                self.height_amplitude
            )));
        }
        if self.dirt_depth < 0 {
            return Err(Error::InvalidConfig(format!(
                "dirt depth must be non-negative, got {}",
                self.dirt_depth
            )));
        }
        Ok(())
    }
}

/// Column-height terrain generator.
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: Box<dyn NoiseSource>,
}

impl fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("config", &self.config)
            .field("noise", &"<dyn NoiseSource>")
            .finish()
    }
}

impl TerrainGenerator {
    /// Create a generator backed by seeded simplex noise.
    #[must_use]
    pub fn new(config: TerrainConfig) -> Self {
        let noise = SimplexNoise::new(config.seed);
        Self::with_noise(config, noise)
    }

    /// Create a generator sampling a caller-supplied noise field.
    #[must_use]
    pub fn with_noise(config: TerrainConfig, noise: impl NoiseSource + 'static) -> Self {
        Self {
            config,
            noise: Box::new(noise),
        }
    }

    /// Create a terrain generator with default configuration.
    #[must_use]
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self::new(TerrainConfig::default().with_seed(seed))
    }

    /// Get the terrain configuration.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Column height at world XZ; the grass block sits at `height - 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let n = self.noise.sample(
            f64::from(world_x) * self.config.frequency,
            f64::from(world_z) * self.config.frequency,
        );
        ((n + 1.0) * self.config.height_amplitude).floor() as i32 + self.config.base_height
    }

    /// Block kind at `y` in a column of the given height.
    #[must_use]
    pub const fn block_for(&self, y: i32, height: i32) -> BlockKind {
        let surface = height - 1;
        if y < surface {
            if y < surface - self.config.dirt_depth {
                BlockKind::Stone
            } else {
                BlockKind::Dirt
            }
        } else if y == surface {
            BlockKind::Grass
        } else if y < self.config.sea_level {
            BlockKind::Water
        } else {
            BlockKind::Air
        }
    }
}
