//! Frame-driven round state machine
//!
//! READY -> PLAYING on the round-start signal, PLAYING -> ENDING when the clock
//! runs out, ENDING -> RESULT when the presentation layer asks for it. Only
//! PLAYING ticks change anything.

use super::autopilot;
use super::collision;
use super::spawn;
use super::state::{GameEvent, GamePhase, RoundState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer movement since the last tick (px)
    pub delta_x: f32,
    /// Idle/demo mode - autopilot steers the basket
    pub idle_mode: bool,
}

impl TickInput {
    pub fn moved(delta_x: f32) -> Self {
        Self {
            delta_x,
            idle_mode: false,
        }
    }
}

/// READY -> PLAYING. Returns false (and changes nothing) in any other phase.
pub fn start_round(state: &mut RoundState) -> bool {
    if state.phase != GamePhase::Ready {
        log::debug!("Ignoring round start in {:?}", state.phase);
        return false;
    }
    state.phase = GamePhase::Playing;
    state.time_remaining = state.config.round_secs;
    log::info!(
        "Round started: {}s, seed {}",
        state.config.round_secs,
        state.seed()
    );
    state.push_event(GameEvent::RoundStarted);
    true
}

/// ENDING -> RESULT. Returns false (and changes nothing) in any other phase.
pub fn show_result(state: &mut RoundState) -> bool {
    if state.phase != GamePhase::Ending {
        log::debug!("Ignoring result request in {:?}", state.phase);
        return false;
    }
    state.phase = GamePhase::Result;
    let final_score = state.score();
    log::info!("Result: {final_score}");
    state.push_event(GameEvent::ResultShown { final_score });
    true
}

/// PLAYING -> ENDING
fn end_round(state: &mut RoundState) {
    state.phase = GamePhase::Ending;
    if state.scorer.clear_crash() {
        state.push_event(GameEvent::CrashEnded);
    }
    let final_score = state.score();
    log::info!(
        "Round ended after {} ticks, score {final_score}",
        state.time_ticks
    );
    state.push_event(GameEvent::RoundEnded { final_score });
}

/// Advance the round by `dt` seconds
pub fn tick(state: &mut RoundState, input: &TickInput, dt: f32) {
    // Non-positive, NaN and infinite frame times are dropped
    if !(dt > 0.0 && dt.is_finite()) {
        return;
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Buffered input lands first so this tick's catches use the new position
    let delta_x = if input.idle_mode {
        autopilot::steer(state, dt)
    } else {
        input.delta_x
    };
    if !(state.config.crash_freezes_player && state.is_crashed()) {
        state.player.apply_delta(delta_x, state.config.screen_width);
    }

    state.time_remaining -= dt;

    if state.scorer.advance(dt) {
        log::debug!("Crash over");
        state.push_event(GameEvent::CrashEnded);
    }

    spawn::step(state);

    // Age items; anything that ran out of fall time is gone before hit testing
    let mut expired = Vec::new();
    for item in &mut state.items {
        if item.advance(dt, &state.config) {
            expired.push(item.id);
        }
    }
    if !expired.is_empty() {
        state.items.retain(|item| item.is_falling());
        for id in expired {
            log::debug!("Item {id} hit the ground");
            state.push_event(GameEvent::ItemExpired { id });
        }
    }

    let catch_point = state.player.catch_point(state.config.catch_offset);
    let caught = collision::take_caught(catch_point, &mut state.items, state.config.item_size);
    for item in caught {
        let effect = state.scorer.apply(item.category, &state.config);
        log::debug!(
            "Caught item {} ({:?}): {:+} -> {}",
            item.id,
            item.category,
            effect.delta,
            effect.score
        );
        state.push_event(GameEvent::ItemCaught {
            id: item.id,
            category: item.category,
            score: effect.score,
        });
        if effect.crash_started {
            state.push_event(GameEvent::CrashStarted);
        }
    }

    if state.time_remaining < 0.0 {
        end_round(state);
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

impl RoundState {
    /// Frame driver entry point: advance by `dt` with a pointer delta
    pub fn on_tick(&mut self, dt: f32, delta_x: f32) {
        tick(self, &TickInput::moved(delta_x), dt);
    }

    /// Intro finished; begin the countdown
    pub fn on_round_start_signal(&mut self) -> bool {
        start_round(self)
    }

    /// Ending presentation finished; show the result
    pub fn on_result_advance_requested(&mut self) -> bool {
        show_result(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundConfig;
    use crate::consts::FRAME_DT;
    use crate::sim::state::{Category, Fruit, Item};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(seed: u64) -> RoundState {
        let mut state = RoundState::new(RoundConfig::default(), seed);
        assert!(state.on_round_start_signal());
        state.drain_events();
        state
    }

    /// Drop an item right on the catch point
    fn item_on_basket(state: &mut RoundState, category: Category) -> u32 {
        let id = state.next_entity_id();
        let point = state.player.catch_point(state.config.catch_offset);
        state.items.push(Item::new(id, category, point, state.elapsed()));
        id
    }

    #[test]
    fn test_round_lifecycle() {
        let mut state = RoundState::new(RoundConfig::default(), 12345);
        assert_eq!(state.phase, GamePhase::Ready);

        // Ticks before the start signal do nothing
        state.on_tick(0.5, 10.0);
        assert_eq!(state.time_remaining, 0.0);
        assert!(state.items.is_empty());

        assert!(state.on_round_start_signal());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_remaining, state.config.round_secs);

        // Result can't be requested while playing
        assert!(!state.on_result_advance_requested());

        let max_ticks = ((state.config.round_secs + 1.0) / FRAME_DT) as usize;
        for _ in 0..max_ticks {
            state.on_tick(FRAME_DT, 0.0);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Ending);
        assert!(state.time_remaining < 0.0);
        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::RoundStarted));
        assert!(matches!(events.last(), Some(GameEvent::RoundEnded { .. })));

        // Ending is frozen until the presentation layer calls back
        let frozen = state.time_remaining;
        state.on_tick(1.0, 0.0);
        assert_eq!(state.time_remaining, frozen);

        assert!(state.on_result_advance_requested());
        assert_eq!(state.phase, GamePhase::Result);

        // A second start in RESULT is ignored
        assert!(!state.on_round_start_signal());
        assert_eq!(state.phase, GamePhase::Result);
        assert!(!state.on_result_advance_requested());
    }

    #[test]
    fn test_start_signal_loads_countdown() {
        let mut state = RoundState::new(RoundConfig::default(), 4);
        state.time_remaining = 12.5;
        assert!(state.on_round_start_signal());
        assert_eq!(state.time_remaining, state.config.round_secs);

        // A duplicate start mid-round leaves the clock alone
        state.on_tick(1.0, 0.0);
        let running = state.time_remaining;
        assert!(!state.on_round_start_signal());
        assert_eq!(state.time_remaining, running);
        assert!(running < state.config.round_secs);
    }

    #[test]
    fn test_restart_after_result() {
        let mut state = playing(1);
        state.time_remaining = 0.01;
        state.on_tick(0.02, 0.0);
        assert!(state.on_result_advance_requested());
        state.restart(2);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.on_round_start_signal());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_bad_dt_is_noop() {
        let mut state = playing(7);
        let before = state.time_remaining;
        let x = state.player.pos.x;
        for dt in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            state.on_tick(dt, 50.0);
        }
        assert_eq!(state.time_remaining, before);
        assert_eq!(state.player.pos.x, x);
        assert_eq!(state.time_ticks, 0);
        assert!(state.items.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut state = playing(3);
        state.on_tick(FRAME_DT, 0.0);
        assert_eq!(state.items.len(), 1);
        assert!(matches!(
            state.drain_events().first(),
            Some(GameEvent::ItemSpawned { .. })
        ));
    }

    #[test]
    fn test_catch_scores_and_removes() {
        let mut state = playing(9);
        let id = item_on_basket(&mut state, Category::Golden);
        state.on_tick(FRAME_DT, 0.0);
        assert!(state.items.iter().all(|i| i.id != id));
        assert_eq!(state.score(), 5);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ItemCaught {
            id,
            category: Category::Golden,
            score: 5,
        }));
    }

    #[test]
    fn test_input_applied_before_hit_test() {
        let mut state = playing(9);
        let id = state.next_entity_id();
        let point = state.player.catch_point(state.config.catch_offset) + Vec2::new(200.0, 0.0);
        state
            .items
            .push(Item::new(id, Category::Normal(Fruit::Grape), point, 0.0));
        state.on_tick(FRAME_DT, 200.0);
        assert!(state.items.iter().all(|i| i.id != id));
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_bomb_crash_freezes_player() {
        let mut state = playing(11);
        state.scorer.apply(Category::Golden, &state.config);
        let id = item_on_basket(&mut state, Category::Bomb);
        state.on_tick(FRAME_DT, 0.0);
        assert_eq!(state.score(), 1);
        assert!(state.is_crashed());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::CrashStarted));
        assert!(events.iter().any(|e| matches!(e, GameEvent::ItemCaught { id: caught, .. } if *caught == id)));

        let x = state.player.pos.x;
        state.on_tick(FRAME_DT, 100.0);
        assert_eq!(state.player.pos.x, x);

        // Wait out the crash
        let ticks = (state.config.crash_secs / FRAME_DT) as usize + 2;
        let mut ended = false;
        for _ in 0..ticks {
            state.on_tick(FRAME_DT, 0.0);
            ended |= state.drain_events().contains(&GameEvent::CrashEnded);
        }
        assert!(ended);
        assert!(!state.is_crashed());
        state.on_tick(FRAME_DT, -100.0);
        assert_eq!(state.player.pos.x, x - 100.0);
    }

    #[test]
    fn test_expired_item_never_caught() {
        let mut state = playing(21);
        let id = state.next_entity_id();
        let origin = Vec2::new(100.0, state.config.spawn_y());
        state
            .items
            .push(Item::new(id, Category::Normal(Fruit::Apple), origin, 0.0));
        // Park the basket away from the item
        state.on_tick(FRAME_DT, 10_000.0);

        let lifetime_ticks = (state.config.item_lifetime() / FRAME_DT) as usize + 2;
        let mut expired = false;
        for _ in 0..lifetime_ticks {
            state.on_tick(FRAME_DT, 0.0);
            expired |= state
                .drain_events()
                .contains(&GameEvent::ItemExpired { id });
        }
        assert!(expired);
        assert!(state.items.iter().all(|i| i.id != id));

        // Standing on its last position catches nothing with that id
        let mut dx = 100.0 - state.player.pos.x;
        for _ in 0..30 {
            state.on_tick(FRAME_DT, dx);
            dx = 0.0;
            let events = state.drain_events();
            assert!(!events.iter().any(
                |e| matches!(e, GameEvent::ItemCaught { id: caught, .. } if *caught == id)
            ));
        }
    }

    #[test]
    fn test_no_spawns_in_last_fall_window() {
        let mut state = playing(5);
        state.time_remaining = state.config.fall_secs;
        state.drain_events();
        while state.phase == GamePhase::Playing {
            state.on_tick(FRAME_DT, 0.0);
            assert!(
                !state
                    .drain_events()
                    .iter()
                    .any(|e| matches!(e, GameEvent::ItemSpawned { .. }))
            );
        }
    }

    #[test]
    fn test_ending_clears_crash() {
        let mut state = playing(13);
        item_on_basket(&mut state, Category::Bomb);
        state.time_remaining = 0.01;
        state.on_tick(0.02, 0.0);
        assert_eq!(state.phase, GamePhase::Ending);
        assert!(!state.is_crashed());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::CrashStarted));
        assert!(events.contains(&GameEvent::CrashEnded));
    }

    #[test]
    fn test_determinism() {
        // Two rounds with the same seed produce identical event streams
        let mut a = playing(99999);
        let mut b = playing(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut a, &input, FRAME_DT);
            tick(&mut b, &input, FRAME_DT);
        }
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.items.len(), b.items.len());
    }

    #[test]
    fn test_items_stay_sorted() {
        let mut state = playing(31);
        for _ in 0..600 {
            state.on_tick(FRAME_DT, 3.0);
        }
        assert!(state.items.windows(2).all(|w| w[0].id < w[1].id));
    }

    proptest! {
        #[test]
        fn prop_countdown_never_increases(
            seed in any::<u64>(),
            steps in prop::collection::vec((-0.1f32..0.2, -500.0f32..500.0), 1..300)
        ) {
            let mut state = playing(seed);
            let mut last = state.time_remaining;
            for (dt, dx) in steps {
                state.on_tick(dt, dx);
                prop_assert!(state.time_remaining <= last);
                last = state.time_remaining;
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= state.config.screen_width);
            }
        }
    }
}
