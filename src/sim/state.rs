//! Round state and core simulation types
//!
//! Everything one round owns lives in [`RoundState`]; a restart rebuilds it
//! wholesale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::rng::{RandomSource, entropy_seed};
use super::score::ScoreKeeper;
use super::spawn::SpawnScheduler;
use crate::clamp_to_screen;
use crate::config::RoundConfig;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the intro to finish
    Ready,
    /// Countdown running
    Playing,
    /// Time is up, "finish" banner showing
    Ending,
    /// Score shown, round over
    Result,
}

/// Ordinary fruit kinds, worth the base score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fruit {
    Apple,
    Grape,
    Orange,
    Banana,
}

impl Fruit {
    pub const ALL: [Fruit; 4] = [Fruit::Apple, Fruit::Grape, Fruit::Orange, Fruit::Banana];

    /// Map an index in `0..ALL.len()` to a fruit (wraps out-of-range values)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Item category, fixed when the item spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Normal(Fruit),
    Golden,
    Bomb,
}

impl Category {
    pub fn is_normal(&self) -> bool {
        matches!(self, Category::Normal(_))
    }
}

/// Item lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    Falling,
    Caught,
    Expired,
}

/// A falling item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub category: Category,
    /// Sprite center at spawn
    pub origin: Vec2,
    /// Current sprite center
    pub pos: Vec2,
    /// Round time (seconds since start) at which the item appeared
    pub spawn_time: f32,
    /// Seconds since spawning
    pub age: f32,
    pub state: ItemState,
}

impl Item {
    pub fn new(id: u32, category: Category, origin: Vec2, spawn_time: f32) -> Self {
        Self {
            id,
            category,
            origin,
            pos: origin,
            spawn_time,
            age: 0.0,
            state: ItemState::Falling,
        }
    }

    /// Hit box at the current position
    pub fn bounds(&self, size: Vec2) -> Aabb {
        Aabb::from_center(self.pos, size)
    }

    pub fn is_falling(&self) -> bool {
        self.state == ItemState::Falling
    }

    /// Advance age and drop position. Returns true if the item just expired.
    ///
    /// The item holds its spawn height for `intro_secs`, then moves linearly to
    /// the ground over `fall_secs`.
    pub fn advance(&mut self, dt: f32, config: &RoundConfig) -> bool {
        if !self.is_falling() {
            return false;
        }
        self.age += dt;
        if self.age >= config.item_lifetime() {
            self.pos.y = 0.0;
            self.state = ItemState::Expired;
            return true;
        }
        let drop_time = (self.age - config.intro_secs).max(0.0);
        let progress = (drop_time / config.fall_secs).clamp(0.0, 1.0);
        self.pos.y = self.origin.y * (1.0 - progress);
        false
    }
}

/// The player's basket; only x moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    /// Basket centered horizontally on its row
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            pos: Vec2::new(config.screen_width / 2.0, config.player_y),
        }
    }

    /// Move by `delta_x`, clamped to the screen
    pub fn apply_delta(&mut self, delta_x: f32, screen_width: f32) {
        let delta_x = if delta_x.is_finite() { delta_x } else { 0.0 };
        self.pos.x = clamp_to_screen(self.pos.x + delta_x, screen_width);
    }

    /// Point used for hit testing
    pub fn catch_point(&self, catch_offset: f32) -> Vec2 {
        self.pos - Vec2::new(0.0, catch_offset)
    }
}

/// Events for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted,
    ItemSpawned { id: u32, category: Category, x: f32 },
    ItemCaught { id: u32, category: Category, score: u32 },
    ItemExpired { id: u32 },
    CrashStarted,
    CrashEnded,
    RoundEnded { final_score: u32 },
    ResultShown { final_score: u32 },
}

/// Complete round state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct RoundState {
    pub config: RoundConfig,
    pub rng: RandomSource,
    pub phase: GamePhase,
    /// Countdown in seconds. Zero until the round starts, then only decreases.
    pub time_remaining: f32,
    pub spawner: SpawnScheduler,
    pub scorer: ScoreKeeper,
    pub player: Player,
    /// Active items, ascending by id (spawn order)
    pub items: Vec<Item>,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl RoundState {
    /// Create a round in READY with the given seed
    pub fn new(config: RoundConfig, seed: u64) -> Self {
        let player = Player::new(&config);
        Self {
            rng: RandomSource::new(seed),
            phase: GamePhase::Ready,
            time_remaining: 0.0,
            spawner: SpawnScheduler::new(),
            scorer: ScoreKeeper::new(),
            player,
            items: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Create a round seeded from system entropy
    pub fn with_entropy(config: RoundConfig) -> Self {
        Self::new(config, entropy_seed())
    }

    /// Full reset to READY with a new seed, keeping the config.
    /// Only call between ticks.
    pub fn restart(&mut self, seed: u64) {
        let config = self.config.clone();
        *self = Self::new(config, seed);
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn score(&self) -> u32 {
        self.scorer.score()
    }

    pub fn is_crashed(&self) -> bool {
        self.scorer.is_crashed()
    }

    /// Seconds of round time elapsed since PLAYING began
    pub fn elapsed(&self) -> f32 {
        self.config.round_secs - self.time_remaining
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure items are sorted by id for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|i| i.id);
    }
}
