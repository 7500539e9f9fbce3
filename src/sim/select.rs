//! Item category selection
//!
//! One draw `r` in `0..=100`. Draws up to `p` are golden, draws up to `2p` are
//! bombs, the rest pick a fruit uniformly. `p` widens in the final stretch.

use super::rng::RandomSource;
use super::state::{Category, Fruit};
use crate::config::RoundConfig;

/// Largest value of the selection draw (inclusive, draws start at 0)
pub const DRAW_MAX: i32 = 100;

/// Map a draw `r` in `0..=DRAW_MAX` to a band. `None` means "ordinary fruit".
pub fn special_band(r: i32, pct: u32) -> Option<Category> {
    let p = pct as i32;
    if r <= p {
        Some(Category::Golden)
    } else if r <= 2 * p {
        Some(Category::Bomb)
    } else {
        None
    }
}

/// Pick a category for an item spawned with `time_remaining` on the clock
pub fn pick(rng: &mut RandomSource, time_remaining: f32, config: &RoundConfig) -> Category {
    let pct = config.special_pct(time_remaining);
    let r = rng.uniform_int(0, DRAW_MAX);
    match special_band(r, pct) {
        Some(category) => category,
        None => {
            let index = rng.uniform_int(0, Fruit::ALL.len() as i32 - 1);
            Category::Normal(Fruit::from_index(index as usize))
        }
    }
}
