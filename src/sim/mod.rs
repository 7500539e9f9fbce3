//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven, one `tick` per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod rng;
pub mod score;
pub mod select;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::Aabb;
pub use collision::resolve;
pub use rng::RandomSource;
pub use score::{ScoreEffect, ScoreKeeper};
pub use spawn::SpawnScheduler;
pub use state::{Category, Fruit, GameEvent, GamePhase, Item, ItemState, Player, RoundState};
pub use tick::{TickInput, show_result, start_round, tick};
