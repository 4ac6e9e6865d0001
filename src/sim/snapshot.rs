//! Read-only view of the simulation for rendering

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::state::{SimPhase, SimState};
use crate::config::SimConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SimPhase,
    pub raw_score: u64,
    pub display_score: u64,
    pub player: PlayerView,
    /// Spawn order, which is also right-to-left order on screen
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &SimState, config: &SimConfig) -> Self {
        Self {
            phase: state.phase,
            raw_score: state.raw_score,
            display_score: config.display_score(state.raw_score),
            player: PlayerView {
                x: config.player_x,
                y: state.player.y,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                    size: o.size,
                })
                .collect(),
        }
    }

    /// JSON encoding for hosts across an FFI boundary
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("encoding snapshot")
    }
}
