//! Round tuning
//!
//! Every value has a default from [`crate::consts`], so a JSON file only
//! needs the fields it wants to override.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a [`RoundConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse round config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tuning for one round of play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    // === Timing ===
    /// Countdown length set when the round starts
    pub round_secs: f32,
    /// Drop time from spawn height to the ground
    pub fall_secs: f32,
    /// Time an item hangs at spawn height before dropping
    pub intro_secs: f32,
    /// Delay the driver waits in ENDING before asking for the result
    pub ending_delay_secs: f32,
    /// Crash cooldown after a bomb
    pub crash_secs: f32,

    // === Geometry ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_y: f32,
    pub catch_offset: f32,
    pub item_size: Vec2,
    pub spawn_top_margin: f32,

    // === Spawn lot ===
    pub lot_time_divisor: f32,
    pub lot_min_trials: u32,
    pub lot_probability: f64,

    // === Item selection ===
    pub late_game_secs: f32,
    pub special_pct_early: u32,
    pub special_pct_late: u32,

    // === Scoring ===
    pub normal_points: u32,
    pub golden_points: u32,
    pub bomb_penalty: u32,
    /// Ignore movement input while crashed
    pub crash_freezes_player: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_secs: ROUND_SECS,
            fall_secs: FALL_SECS,
            intro_secs: INTRO_SECS,
            ending_delay_secs: ENDING_DELAY_SECS,
            crash_secs: CRASH_SECS,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_y: PLAYER_Y,
            catch_offset: CATCH_OFFSET,
            item_size: Vec2::new(ITEM_WIDTH, ITEM_HEIGHT),
            spawn_top_margin: SPAWN_TOP_MARGIN,

            lot_time_divisor: LOT_TIME_DIVISOR,
            lot_min_trials: LOT_MIN_TRIALS,
            lot_probability: LOT_PROBABILITY,

            late_game_secs: LATE_GAME_SECS,
            special_pct_early: SPECIAL_PCT_EARLY,
            special_pct_late: SPECIAL_PCT_LATE,

            normal_points: NORMAL_POINTS,
            golden_points: GOLDEN_POINTS,
            bomb_penalty: BOMB_PENALTY,
            crash_freezes_player: true,
        }
    }
}

fn positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a positive finite number",
        })
    }
}

impl RoundConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default round config");
                Self::default()
            }
        }
    }

    /// Check that the values describe a playable round
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(self.round_secs, "round_secs")?;
        positive(self.fall_secs, "fall_secs")?;
        positive(self.crash_secs, "crash_secs")?;
        positive(self.screen_width, "screen_width")?;
        positive(self.screen_height, "screen_height")?;
        positive(self.item_size.x, "item_size.x")?;
        positive(self.item_size.y, "item_size.y")?;
        positive(self.lot_time_divisor, "lot_time_divisor")?;

        if !(self.intro_secs.is_finite() && self.intro_secs >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "intro_secs",
                reason: "must be zero or positive",
            });
        }
        if !(self.ending_delay_secs.is_finite() && self.ending_delay_secs >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "ending_delay_secs",
                reason: "must be zero or positive",
            });
        }
        if self.fall_secs >= self.round_secs {
            return Err(ConfigError::Invalid {
                field: "fall_secs",
                reason: "must be shorter than the round",
            });
        }
        if self.item_size.x > self.screen_width {
            return Err(ConfigError::Invalid {
                field: "item_size.x",
                reason: "wider than the screen",
            });
        }
        if !(0.0..=1.0).contains(&self.lot_probability) {
            return Err(ConfigError::Invalid {
                field: "lot_probability",
                reason: "must be within [0, 1]",
            });
        }
        if self.special_pct_early.saturating_mul(2) > 100 {
            return Err(ConfigError::Invalid {
                field: "special_pct_early",
                reason: "golden and bomb bands exceed 100%",
            });
        }
        if self.special_pct_late.saturating_mul(2) > 100 {
            return Err(ConfigError::Invalid {
                field: "special_pct_late",
                reason: "golden and bomb bands exceed 100%",
            });
        }
        let catch_y = self.player_y - self.catch_offset;
        if !(catch_y.is_finite() && (0.0..=self.screen_height).contains(&catch_y)) {
            return Err(ConfigError::Invalid {
                field: "player_y",
                reason: "catch point is off-screen",
            });
        }
        Ok(())
    }

    /// Height items spawn at (sprite center)
    pub fn spawn_y(&self) -> f32 {
        self.screen_height - self.spawn_top_margin - self.item_size.y / 2.0
    }

    /// Age at which an uncaught item is removed
    pub fn item_lifetime(&self) -> f32 {
        self.intro_secs + self.fall_secs
    }

    /// Special-item band width for the given time left
    pub fn special_pct(&self, time_remaining: f32) -> u32 {
        if time_remaining < self.late_game_secs {
            self.special_pct_late
        } else {
            self.special_pct_early
        }
    }
}
