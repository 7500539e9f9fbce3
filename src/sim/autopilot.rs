//! Idle/demo mode - the basket plays itself
//!
//! Chases the lowest catchable fruit (golden first) and sidesteps bombs that
//! are about to land on the basket.

use super::state::{Category, Item, RoundState};
use crate::consts::AUTOPILOT_SPEED;

/// Bombs closer than this above the catch point trigger a dodge
const DODGE_HEIGHT: f32 = 300.0;

/// Still reachable: the item's bottom edge hasn't passed the catch point
fn reachable(item: &Item, catch_y: f32, half_h: f32) -> bool {
    item.is_falling() && item.pos.y + half_h >= catch_y
}

/// Compute this tick's movement delta
pub fn steer(state: &RoundState, dt: f32) -> f32 {
    if dt <= 0.0 || !dt.is_finite() {
        return 0.0;
    }
    let config = &state.config;
    let max_step = AUTOPILOT_SPEED * dt;
    let x = state.player.pos.x;
    let catch_y = state.player.catch_point(config.catch_offset).y;
    let half = config.item_size / 2.0;

    // Dodge first
    let threat = state.items.iter().find(|item| {
        item.category == Category::Bomb
            && reachable(item, catch_y, half.y)
            && item.pos.y - catch_y < DODGE_HEIGHT
            && (item.pos.x - x).abs() <= half.x
    });
    if let Some(bomb) = threat {
        let go_left = bomb.pos.x >= x && bomb.pos.x - half.x > 0.0;
        let edge = if go_left {
            bomb.pos.x - half.x - 1.0
        } else {
            bomb.pos.x + half.x + 1.0
        };
        return (edge - x).clamp(-max_step, max_step);
    }

    let target = state
        .items
        .iter()
        .filter(|item| item.category != Category::Bomb && reachable(item, catch_y, half.y))
        .min_by(|a, b| {
            let a_key = (a.category != Category::Golden, a.pos.y);
            let b_key = (b.category != Category::Golden, b.pos.y);
            a_key
                .partial_cmp(&b_key)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match target {
        Some(item) => (item.pos.x - x).clamp(-max_step, max_step),
        None => 0.0,
    }
}
