//! Evasion Training - obstacle-avoidance minigame simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `driver`: Host loop glue (frame deltas, spawn cadence, key mapping)
//! - `config`: Data-driven gameplay tunables
//! - `highscores`: Finished-run leaderboard
//! - `web`: Browser bindings (wasm32 only)

pub mod config;
pub mod driver;
pub mod highscores;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SimConfig;
pub use driver::Driver;
pub use highscores::HighScores;
pub use sim::{Direction, Engine, SimEvent, SimPhase, Snapshot};

/// Reference gameplay constants (all positions are percentages of the play field)
pub mod consts {
    /// Player craft horizontal position (fixed)
    pub const PLAYER_X: f32 = 10.0;
    /// Player vertical position on (re)start
    pub const PLAYER_START_Y: f32 = 50.0;
    /// Player vertical bounds (inclusive)
    pub const PLAYER_MIN_Y: f32 = 5.0;
    pub const PLAYER_MAX_Y: f32 = 95.0;
    /// Vertical step per directional input
    pub const PLAYER_STEP: f32 = 8.0;

    /// Obstacles spawn just off the right edge
    pub const OBSTACLE_SPAWN_X: f32 = 110.0;
    /// Obstacles at or left of this are culled
    pub const OBSTACLE_DESPAWN_X: f32 = -20.0;
    /// Spawn vertical range [min, max)
    pub const OBSTACLE_MIN_Y: f32 = 5.0;
    pub const OBSTACLE_MAX_Y: f32 = 95.0;
    /// Spawn size range [min, max)
    pub const OBSTACLE_MIN_SIZE: f32 = 10.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 30.0;
    /// Horizontal speed in units per millisecond
    pub const OBSTACLE_SPEED: f32 = 0.1;
    /// Spawn cadence in milliseconds
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;

    /// Collision fires when |dx| < HIT_TOLERANCE_X ...
    pub const HIT_TOLERANCE_X: f32 = 5.0;
    /// ... and |dy| < size / 2 + HIT_MARGIN_Y
    pub const HIT_MARGIN_Y: f32 = 5.0;

    /// Raw score ticks per displayed point
    pub const SCORE_DIVISOR: u64 = 10;

    /// Longest frame delta the host loop feeds into a tick (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Maximum obstacle spawns caught up in one frame
    pub const MAX_SPAWNS_PER_FRAME: u32 = 4;
}
