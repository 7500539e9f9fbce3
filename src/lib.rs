//! Fruit Catch - simulation core for a timed arcade catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, catching, scoring, round phases)
//! - `config`: Data-driven round tuning

pub mod config;
pub mod sim;

pub use config::{ConfigError, RoundConfig};

/// Default tuning constants
pub mod consts {
    /// Length of one round (seconds)
    pub const ROUND_SECS: f32 = 60.0;
    /// Time an item takes to drop from spawn height to the ground
    pub const FALL_SECS: f32 = 3.0;
    /// Scale-in and wobble before an item starts dropping
    pub const INTRO_SECS: f32 = 1.25;
    /// "Finish" banner time before the result screen
    pub const ENDING_DELAY_SECS: f32 = 3.5;
    /// Crash cooldown after catching a bomb
    pub const CRASH_SECS: f32 = 3.0;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 1136.0;

    /// Player basket row
    pub const PLAYER_Y: f32 = 220.0;
    /// Catch point sits this far below the basket center
    pub const CATCH_OFFSET: f32 = 10.0;

    /// Item sprite size
    pub const ITEM_WIDTH: f32 = 80.0;
    pub const ITEM_HEIGHT: f32 = 80.0;
    /// Gap between the screen top and a freshly spawned item
    pub const SPAWN_TOP_MARGIN: f32 = 40.0;

    /// Spawn lot: trials = max(time_remaining / divisor, min_trials)
    pub const LOT_TIME_DIVISOR: f32 = 1.5;
    pub const LOT_MIN_TRIALS: u32 = 12;
    pub const LOT_PROBABILITY: f64 = 0.5;

    /// Below this much time left, special items get the wider band
    pub const LATE_GAME_SECS: f32 = 20.0;
    /// Golden/bomb band widths, in percent of the draw space
    pub const SPECIAL_PCT_EARLY: u32 = 5;
    pub const SPECIAL_PCT_LATE: u32 = 12;

    /// Score deltas
    pub const NORMAL_POINTS: u32 = 1;
    pub const GOLDEN_POINTS: u32 = 5;
    pub const BOMB_PENALTY: u32 = 4;

    /// Autopilot basket speed (px/s)
    pub const AUTOPILOT_SPEED: f32 = 900.0;

    /// Frame time used by the headless driver
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Clamp an x coordinate to the screen, mapping NaN to the left edge
#[inline]
pub fn clamp_to_screen(x: f32, screen_width: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, screen_width.max(0.0))
}
