//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only through `tick`'s elapsed-milliseconds argument
//! - Injected or seeded RNG only
//! - Stable iteration order (spawn order, which is ID order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{first_hit, obstacle_hits_player};
pub use engine::Engine;
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use state::{Direction, Obstacle, Player, SimEvent, SimPhase, SimState};
pub use tick::{apply_input, spawn_obstacle, tick};
