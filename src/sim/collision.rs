//! Craft vs obstacle hit test
//!
//! Axis-aligned, with asymmetric tolerances: a fixed horizontal window and a
//! vertical window that grows with obstacle size.

use super::state::{Obstacle, Player};
use crate::config::SimConfig;

/// True if `obstacle` overlaps the craft
pub fn obstacle_hits_player(obstacle: &Obstacle, player: &Player, config: &SimConfig) -> bool {
    let delta = (obstacle.pos - player.pos(config)).abs();
    delta.x < config.hit_tolerance_x && delta.y < obstacle.size / 2.0 + config.hit_margin_y
}

/// First obstacle (in spawn order) that overlaps the craft
pub fn first_hit<'a>(
    obstacles: &'a [Obstacle],
    player: &Player,
    config: &SimConfig,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|obstacle| obstacle_hits_player(obstacle, player, config))
}
