//! Harness configuration (simulation length, input script, terrain, tuning).
//! Loaded from config.ron at startup.

use anyhow::Context;
use locomotion::LocomotionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use terrain::HeightmapConfig;
use thiserror::Error;

/// Harness settings that cannot drive a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("frame delta {frame_delta}s is longer than the whole run ({sim_seconds}s)")]
    FrameLongerThanRun { frame_delta: f32, sim_seconds: f32 },
}

/// Which input driver plays the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptKind {
    /// Fixed demo timeline exercising every move.
    Scripted,
    /// Seeded random walk.
    Wander,
}

/// Ground surface for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Flat,
    Rolling,
}

/// Persistent harness settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Simulated seconds to run.
    #[serde(default = "default_sim_seconds")]
    pub sim_seconds: f32,
    /// Fixed frame delta in seconds.
    #[serde(default = "default_frame_delta")]
    pub frame_delta: f32,
    /// Seed for the wander script and generated terrain.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_script")]
    pub script: ScriptKind,
    #[serde(default = "default_terrain")]
    pub terrain: TerrainKind,
    /// Used when `terrain` is `Rolling`.
    #[serde(default)]
    pub heightmap: HeightmapConfig,
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Seconds (start, end) during which the inventory is open and movement
    /// is suppressed.
    #[serde(default = "default_inventory_window")]
    pub inventory_window: Option<(f32, f32)>,
    /// Where the mirror rig stands.
    #[serde(default = "default_mirror_position")]
    pub mirror_position: [f32; 3],
    /// Seconds between status lines.
    #[serde(default = "default_summary_interval")]
    pub summary_interval: f32,
    #[serde(default)]
    pub locomotion: LocomotionConfig,
}

fn default_sim_seconds() -> f32 {
    20.0
}
fn default_frame_delta() -> f32 {
    1.0 / 60.0
}
fn default_script() -> ScriptKind {
    ScriptKind::Scripted
}
fn default_terrain() -> TerrainKind {
    TerrainKind::Flat
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_inventory_window() -> Option<(f32, f32)> {
    Some((16.5, 18.0))
}
fn default_mirror_position() -> [f32; 3] {
    [0.0, 0.0, 15.0]
}
fn default_summary_interval() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sim_seconds: default_sim_seconds(),
            frame_delta: default_frame_delta(),
            seed: 0,
            script: default_script(),
            terrain: default_terrain(),
            heightmap: HeightmapConfig::default(),
            sensitivity: default_sensitivity(),
            inventory_window: default_inventory_window(),
            mirror_position: default_mirror_position(),
            summary_interval: default_summary_interval(),
            locomotion: LocomotionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`load`](Self::load), a
    /// missing or malformed file is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), GameConfigError> {
        let positive = [
            ("sim_seconds", self.sim_seconds),
            ("frame_delta", self.frame_delta),
            ("summary_interval", self.summary_interval),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(GameConfigError::NonPositive { field, value });
            }
        }
        if self.frame_delta > self.sim_seconds {
            return Err(GameConfigError::FrameLongerThanRun {
                frame_delta: self.frame_delta,
                sim_seconds: self.sim_seconds,
            });
        }
        Ok(())
    }

    /// Frames in the run. Only meaningful for a config that passed
    /// [`validate`](Self::validate).
    pub fn frame_count(&self) -> u64 {
        (self.sim_seconds / self.frame_delta).ceil().max(0.0) as u64
    }

    pub fn inventory_open_at(&self, elapsed: f32) -> bool {
        self.inventory_window
            .is_some_and(|(start, end)| elapsed >= start && elapsed < end)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
