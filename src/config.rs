//! Gameplay tunables
//!
//! Defaults reproduce the reference training sim. A JSON file may override
//! any subset of fields; missing fields keep their defaults.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Player ===
    /// Fixed horizontal position of the craft
    pub player_x: f32,
    /// Vertical position on (re)start
    pub player_start_y: f32,
    pub player_min_y: f32,
    pub player_max_y: f32,
    /// Vertical step per directional input
    pub player_step: f32,

    // === Obstacles ===
    pub spawn_x: f32,
    pub despawn_x: f32,
    pub obstacle_min_y: f32,
    pub obstacle_max_y: f32,
    pub obstacle_min_size: f32,
    pub obstacle_max_size: f32,
    /// Units per millisecond
    pub obstacle_speed: f32,
    pub spawn_interval_ms: f32,

    // === Collision ===
    pub hit_tolerance_x: f32,
    pub hit_margin_y: f32,

    // === Scoring ===
    pub score_divisor: u64,

    // === Host loop ===
    pub max_frame_ms: f32,
    pub max_spawns_per_frame: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_x: PLAYER_X,
            player_start_y: PLAYER_START_Y,
            player_min_y: PLAYER_MIN_Y,
            player_max_y: PLAYER_MAX_Y,
            player_step: PLAYER_STEP,

            spawn_x: OBSTACLE_SPAWN_X,
            despawn_x: OBSTACLE_DESPAWN_X,
            obstacle_min_y: OBSTACLE_MIN_Y,
            obstacle_max_y: OBSTACLE_MAX_Y,
            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            hit_tolerance_x: HIT_TOLERANCE_X,
            hit_margin_y: HIT_MARGIN_Y,

            score_divisor: SCORE_DIVISOR,

            max_frame_ms: MAX_FRAME_MS,
            max_spawns_per_frame: MAX_SPAWNS_PER_FRAME,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid sim config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading sim config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("loading sim config {}", path.display()))?;
        log::info!("Loaded sim config from {}", path.display());
        Ok(config)
    }

    /// Check that every range is non-empty and every rate is positive
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.player_min_y <= self.player_max_y,
            "player bounds are inverted ({} > {})",
            self.player_min_y,
            self.player_max_y
        );
        ensure!(
            (self.player_min_y..=self.player_max_y).contains(&self.player_start_y),
            "player start y {} is outside [{}, {}]",
            self.player_start_y,
            self.player_min_y,
            self.player_max_y
        );
        ensure!(self.player_step >= 0.0, "player step must not be negative");
        ensure!(
            self.obstacle_min_y < self.obstacle_max_y,
            "obstacle y range is empty"
        );
        ensure!(
            self.obstacle_min_size < self.obstacle_max_size,
            "obstacle size range is empty"
        );
        ensure!(self.obstacle_min_size >= 0.0, "obstacle size must not be negative");
        ensure!(
            self.despawn_x < self.spawn_x,
            "despawn x {} must be left of spawn x {}",
            self.despawn_x,
            self.spawn_x
        );
        ensure!(self.obstacle_speed > 0.0, "obstacle speed must be positive");
        ensure!(self.spawn_interval_ms > 0.0, "spawn interval must be positive");
        ensure!(self.score_divisor > 0, "score divisor must be positive");
        ensure!(self.max_frame_ms > 0.0, "max frame delta must be positive");
        ensure!(
            self.max_spawns_per_frame > 0,
            "max spawns per frame must be positive"
        );
        Ok(())
    }

    /// Presentation score derived from the raw tick counter
    pub fn display_score(&self, raw_score: u64) -> u64 {
        raw_score / self.score_divisor.max(1)
    }
}
