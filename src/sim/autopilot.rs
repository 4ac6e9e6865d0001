//! Demo pilot for idle/attract mode and headless runs
//!
//! Looks only at the closest obstacle still ahead of the craft whose vertical
//! hit window (plus one input step of slack) covers the craft.

use super::state::{Direction, SimState};
use crate::config::SimConfig;

/// How far ahead (in field units) the pilot starts reacting
pub const LOOKAHEAD_X: f32 = 40.0;

/// Pick a dodge direction for this frame, if any
pub fn steer(state: &SimState, config: &SimConfig) -> Option<Direction> {
    if !state.is_running() {
        return None;
    }

    let player_y = state.player.y;
    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            let ahead = o.pos.x - config.player_x;
            ahead > -config.hit_tolerance_x && ahead < LOOKAHEAD_X
        })
        .filter(|o| {
            let window = o.size / 2.0 + config.hit_margin_y + config.player_step;
            (o.pos.y - player_y).abs() < window
        })
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    // Dodge away from the obstacle's center, bouncing off the field edges
    let preferred = if threat.pos.y >= player_y {
        Direction::Up
    } else {
        Direction::Down
    };
    let blocked = match preferred {
        Direction::Up => player_y - config.player_step < config.player_min_y,
        Direction::Down => player_y + config.player_step > config.player_max_y,
    };
    if blocked {
        Some(match preferred {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        })
    } else {
        Some(preferred)
    }
}
