//! Per-frame simulation step
//!
//! Three independently paced drivers act on one `SimState`: the render loop
//! calls `tick`, a fixed-interval timer calls `spawn_obstacle`, and input
//! handling calls `apply_input`. All three are no-ops outside `Running`.

use glam::Vec2;
use rand::Rng;

use super::collision::first_hit;
use super::state::{Direction, Obstacle, SimEvent, SimPhase, SimState};
use crate::config::SimConfig;

/// Advance the simulation by `elapsed_ms` of wall-clock time
///
/// Returns `Some(SimEvent::Collision)` when this step ended the run.
pub fn tick(state: &mut SimState, elapsed_ms: f32, config: &SimConfig) -> Option<SimEvent> {
    if !state.is_running() {
        return None;
    }

    // Corrupt deltas would poison every obstacle position
    if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
        log::warn!("Ignoring invalid tick delta: {elapsed_ms}");
        return None;
    }

    let distance = elapsed_ms * config.obstacle_speed;
    for obstacle in &mut state.obstacles {
        obstacle.advance(distance);
    }
    state.obstacles.retain(|o| o.pos.x > config.despawn_x);
    state.ticks += 1;

    if let Some(hit) = first_hit(&state.obstacles, &state.player, config) {
        let event = SimEvent::Collision {
            obstacle_id: hit.id,
            raw_score: state.raw_score,
        };
        state.phase = SimPhase::GameOver;
        log::info!(
            "Collision with obstacle {} after {} ticks (score {})",
            hit.id,
            state.ticks,
            config.display_score(state.raw_score)
        );
        return Some(event);
    }

    state.raw_score += 1;
    None
}

/// Add one obstacle just off the right edge
///
/// Returns the new obstacle's ID, or `None` if not running.
pub fn spawn_obstacle<R: Rng + ?Sized>(
    state: &mut SimState,
    rng: &mut R,
    config: &SimConfig,
) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let y = uniform(rng, config.obstacle_min_y, config.obstacle_max_y);
    let size = uniform(rng, config.obstacle_min_size, config.obstacle_max_size);
    let id = state.next_obstacle_id();
    state
        .obstacles
        .push(Obstacle::new(id, Vec2::new(config.spawn_x, y), size));
    log::debug!("Spawned obstacle {id} at y={y:.1} size={size:.1}");
    Some(id)
}

/// Move the craft one step; ignored outside `Running`
pub fn apply_input(state: &mut SimState, direction: Direction, config: &SimConfig) {
    if state.is_running() {
        state.player.nudge(direction, config);
    }
}

/// Uniform draw from [min, max), falling back to `min` for an empty range
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min < max {
        rng.random_range(min..max)
    } else {
        min
    }
}
