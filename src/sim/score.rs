//! Score and crash bookkeeping

use serde::{Deserialize, Serialize};

use super::state::Category;
use crate::config::RoundConfig;

/// Outcome of applying one caught item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEffect {
    pub category: Category,
    /// Score after the catch
    pub score: u32,
    /// Signed change actually applied (a bomb at low score removes less)
    pub delta: i64,
    /// True if this catch moved the player into the crash state
    pub crash_started: bool,
}

/// Owns the score and the crash cooldown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreKeeper {
    score: u32,
    /// Seconds of crash left (0 = not crashed)
    crash_remaining: f32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_crashed(&self) -> bool {
        self.crash_remaining > 0.0
    }

    pub fn crash_remaining(&self) -> f32 {
        self.crash_remaining
    }

    /// Apply a caught item's score effect
    pub fn apply(&mut self, category: Category, config: &RoundConfig) -> ScoreEffect {
        let before = self.score;
        let mut crash_started = false;
        match category {
            Category::Normal(_) => {
                self.score = self.score.saturating_add(config.normal_points);
            }
            Category::Golden => {
                self.score = self.score.saturating_add(config.golden_points);
            }
            Category::Bomb => {
                self.score = self.score.saturating_sub(config.bomb_penalty);
                crash_started = !self.is_crashed();
                // A second bomb restarts the cooldown
                self.crash_remaining = config.crash_secs;
            }
        }
        ScoreEffect {
            category,
            score: self.score,
            delta: i64::from(self.score) - i64::from(before),
            crash_started,
        }
    }

    /// Run the crash cooldown. Returns true when the crash just ended.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_crashed() {
            return false;
        }
        self.crash_remaining = (self.crash_remaining - dt).max(0.0);
        !self.is_crashed()
    }

    /// Drop any crash immediately. Returns true if one was active.
    pub fn clear_crash(&mut self) -> bool {
        let was = self.is_crashed();
        self.crash_remaining = 0.0;
        was
    }
}
