//! Randomized item spawning
//!
//! A "lot" counts ticks until the next spawn. When it reaches zero an item
//! drops and the lot is redrawn from Binomial(round(max(t / 1.5, 12)), 0.5),
//! so gaps shrink as the clock runs down. Nothing spawns once fewer than
//! `fall_secs` remain.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::select;
use super::state::{GameEvent, Item, RoundState};
use crate::config::RoundConfig;

/// Tick countdown between spawns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Ticks left before the next spawn (0 = due now)
    lot: u32,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lot(&self) -> u32 {
        self.lot
    }

    /// Whether spawning is still allowed with this much time left
    pub fn spawning_open(time_remaining: f32, config: &RoundConfig) -> bool {
        time_remaining > config.fall_secs
    }

    /// Binomial trial count for the given time left
    pub fn lot_trials(time_remaining: f32, config: &RoundConfig) -> u32 {
        let t = (time_remaining / config.lot_time_divisor).max(config.lot_min_trials as f32);
        t.round() as u32
    }

    /// Advance one tick. Returns true if an item should spawn this tick.
    pub fn step(
        &mut self,
        time_remaining: f32,
        rng: &mut RandomSource,
        config: &RoundConfig,
    ) -> bool {
        if Self::spawning_open(time_remaining, config) && self.lot == 0 {
            let trials = Self::lot_trials(time_remaining, config);
            self.lot = rng.binomial(trials, config.lot_probability);
            log::debug!("Spawn lot redrawn: {} ticks ({} trials)", self.lot, trials);
            true
        } else {
            self.lot = self.lot.saturating_sub(1);
            false
        }
    }
}

/// Run the scheduler for one tick and drop an item if it fires
pub fn step(state: &mut RoundState) -> Option<u32> {
    if !state
        .spawner
        .step(state.time_remaining, &mut state.rng, &state.config)
    {
        return None;
    }
    Some(spawn_item(state))
}

/// Create one item at a random column along the top of the screen
pub fn spawn_item(state: &mut RoundState) -> u32 {
    let category = select::pick(&mut state.rng, state.time_remaining, &state.config);

    // Keep the whole sprite on screen
    let half_w = state.config.item_size.x / 2.0;
    let min_x = half_w.ceil() as i32;
    let max_x = (state.config.screen_width - half_w).floor() as i32;
    let x = state.rng.uniform_int(min_x, max_x.max(min_x)) as f32;

    let id = state.next_entity_id();
    let pos = Vec2::new(x, state.config.spawn_y());
    state.items.push(Item::new(id, category, pos, state.elapsed()));
    log::debug!("Spawned item {id} ({category:?}) at x={x}");
    state.push_event(GameEvent::ItemSpawned { id, category, x });
    id
}
