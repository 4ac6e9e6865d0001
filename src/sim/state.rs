//! Simulation state and core types
//!
//! Everything a host needs to draw a frame or replay a run lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// Lifecycle phase of a training run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Waiting for a start command (initial state, and after abort)
    #[default]
    Idle,
    /// Obstacles spawn and move, score accumulates
    Running,
    /// Craft was hit; score frozen until restart
    GameOver,
}

/// Directional input (screen coordinates: Up decreases y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed y change for one input step
    pub fn signum(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Notable transitions, drained by the host to manage its timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A run began (or restarted)
    Started,
    /// An obstacle entered the field
    Spawned { id: u32 },
    /// The craft hit an obstacle; run is over
    Collision { obstacle_id: u32, raw_score: u64 },
    /// The run was abandoned
    Aborted,
}

/// A drifting hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// x decreases over time; y fixed at spawn
    pub pos: Vec2,
    /// Fixed at spawn
    pub size: f32,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, size: f32) -> Self {
        Self { id, pos, size }
    }

    /// Drift left by `distance` units
    pub fn advance(&mut self, distance: f32) {
        self.pos.x -= distance;
    }
}

/// The player's scout craft (x is fixed by config)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub y: f32,
}

impl Player {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            y: config.player_start_y,
        }
    }

    /// Step toward `direction`, clamped to the play field
    ///
    /// Inverted bounds pin the craft to `player_max_y` instead of panicking.
    pub fn nudge(&mut self, direction: Direction, config: &SimConfig) {
        let y = self.y + direction.signum() * config.player_step;
        self.y = y.max(config.player_min_y).min(config.player_max_y);
    }

    pub fn pos(&self, config: &SimConfig) -> Vec2 {
        Vec2::new(config.player_x, self.y)
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub phase: SimPhase,
    /// Incremented once per collision-free tick while running
    pub raw_score: u64,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Ticks advanced in the current run
    pub ticks: u64,
    /// Next obstacle ID (never rewound within one engine)
    next_id: u32,
}

impl SimState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            phase: SimPhase::Idle,
            raw_score: 0,
            player: Player::new(config),
            obstacles: Vec::new(),
            ticks: 0,
            next_id: 0,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the run and enter `Running`; the ID sequence carries on
    pub fn reset_run(&mut self, config: &SimConfig) {
        self.raw_score = 0;
        self.ticks = 0;
        self.obstacles.clear();
        self.player = Player::new(config);
        self.phase = SimPhase::Running;
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge_clamps() {
        let config = SimConfig::default();
        let mut player = Player::new(&config);
        for _ in 0..20 {
            player.nudge(Direction::Up, &config);
        }
        assert_eq!(player.y, config.player_min_y);
        for _ in 0..20 {
            player.nudge(Direction::Down, &config);
        }
        assert_eq!(player.y, config.player_max_y);
    }

    #[test]
    fn test_nudge_with_inverted_bounds() {
        let config = SimConfig {
            player_min_y: 95.0,
            player_max_y: 5.0,
            ..Default::default()
        };
        let mut player = Player::new(&config);
        player.nudge(Direction::Up, &config);
        assert_eq!(player.y, 5.0);
        player.nudge(Direction::Down, &config);
        assert_eq!(player.y, 5.0);
    }

    #[test]
    fn test_ids_survive_reset() {
        let config = SimConfig::default();
        let mut state = SimState::new(&config);
        assert_eq!(state.next_obstacle_id(), 0);
        assert_eq!(state.next_obstacle_id(), 1);
        state.reset_run(&config);
        assert_eq!(state.next_obstacle_id(), 2);
        assert_eq!(state.phase, SimPhase::Running);
    }
}
