//! Ground surfaces: flat planes and noise-generated heightmaps.
//!
//! **Seed-based determinism:** all noise is derived from `config.seed`, so the same seed
//! always produces the same height at every (x, z).

use engine_core::TerrainQuery;
use noise::{NoiseFn, Perlin, Simplex};
use serde::{Deserialize, Serialize};

/// Derive a deterministic u32 noise seed from a world seed and an offset.
#[inline]
fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// Constant-height ground.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl TerrainQuery for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

/// Configuration for heightmap generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightmapConfig {
    /// Size of the square terrain in world units, centred on the origin.
    pub size: f32,
    /// Number of samples per side.
    pub resolution: u32,
    /// Maximum height of terrain.
    pub height_scale: f32,
    /// Noise frequency (lower = smoother).
    pub frequency: f64,
    /// Number of octaves for fractal noise.
    pub octaves: u32,
    /// Lacunarity (frequency multiplier per octave).
    pub lacunarity: f64,
    /// Persistence (amplitude multiplier per octave).
    pub persistence: f64,
    pub seed: u64,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            resolution: 129,
            height_scale: 4.0,
            frequency: 0.02,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 0,
        }
    }
}

/// A square grid of heights sampled from fractal noise.
#[derive(Debug, Clone)]
pub struct Heightmap {
    pub config: HeightmapConfig,
    heights: Vec<f32>,
}

impl Heightmap {
    /// Generate heights from configuration. Resolution is raised to at least 2.
    pub fn generate(mut config: HeightmapConfig) -> Self {
        config.resolution = config.resolution.max(2);
        let perlin = Perlin::new(deterministic_noise_seed(config.seed, 0));
        let simplex = Simplex::new(deterministic_noise_seed(config.seed, 1));

        let res = config.resolution as usize;
        let step = config.size / (config.resolution - 1) as f32;
        let half = config.size / 2.0;

        let mut heights = Vec::with_capacity(res * res);
        for z in 0..res {
            for x in 0..res {
                let world_x = x as f32 * step - half;
                let world_z = z as f32 * step - half;
                let n = Self::fractal_noise(&perlin, &simplex, world_x as f64, world_z as f64, &config);
                heights.push(n as f32 * config.height_scale);
            }
        }

        log::debug!(
            "Generated {}x{} heightmap over {}m (seed {})",
            res,
            res,
            config.size,
            config.seed
        );

        Self { config, heights }
    }

    /// Build from explicit row-major heights (index = z * resolution + x).
    pub fn from_heights(config: HeightmapConfig, heights: Vec<f32>) -> Option<Self> {
        let res = config.resolution as usize;
        (res >= 2 && heights.len() == res * res).then_some(Self { config, heights })
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Bilinear height sample. Positions outside the grid clamp to the edge.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        let res = self.config.resolution as usize;
        let half_size = self.config.size / 2.0;
        let step = self.config.size / (self.config.resolution - 1) as f32;

        let gx = ((x + half_size) / step).clamp(0.0, (res - 1) as f32);
        let gz = ((z + half_size) / step).clamp(0.0, (res - 1) as f32);

        let x0 = (gx.floor() as usize).min(res - 2);
        let z0 = (gz.floor() as usize).min(res - 2);
        let fx = gx - x0 as f32;
        let fz = gz - z0 as f32;

        let h00 = self.heights[z0 * res + x0];
        let h10 = self.heights[z0 * res + x0 + 1];
        let h01 = self.heights[(z0 + 1) * res + x0];
        let h11 = self.heights[(z0 + 1) * res + x0 + 1];

        let top = h00 + (h10 - h00) * fx;
        let bottom = h01 + (h11 - h01) * fx;
        top + (bottom - top) * fz
    }

    fn fractal_noise(perlin: &Perlin, simplex: &Simplex, x: f64, z: f64, config: &HeightmapConfig) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = config.frequency;
        let mut max_value = 0.0;

        for _ in 0..config.octaves.max(1) {
            let perlin_sample = perlin.get([x * frequency, z * frequency]);
            let simplex_sample = simplex.get([x * frequency + 1000.0, z * frequency + 1000.0]);

            value += (perlin_sample * 0.7 + simplex_sample * 0.3) * amplitude;
            max_value += amplitude;

            amplitude *= config.persistence;
            frequency *= config.lacunarity;
        }

        // Normalize to 0-1 range
        (value / max_value + 1.0) * 0.5
    }
}

impl TerrainQuery for Heightmap {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.sample_height(x, z)
    }
}
