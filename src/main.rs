//! Fruit Catch headless driver
//!
//! Plays one round on autopilot at a fixed frame rate and prints every game
//! event as a JSON line.
//!
//! Usage: `fruit-catch [seed] [config.json]`

use fruit_catch::RoundConfig;
use fruit_catch::consts::FRAME_DT;
use fruit_catch::sim::rng::entropy_seed;
use fruit_catch::sim::{GameEvent, GamePhase, RoundState, TickInput, tick};

/// Stop a runaway loop if the round never ends
const MAX_FRAMES: u64 = 60 * 60 * 30;

fn load_config(path: Option<&str>) -> RoundConfig {
    let Some(path) = path else {
        return RoundConfig::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => {
            log::info!("Loading round config from {path}");
            RoundConfig::from_json_or_default(&json)
        }
        Err(err) => {
            log::warn!("Can't read {path}: {err}; using default round config");
            RoundConfig::default()
        }
    }
}

fn emit(events: Vec<GameEvent>) {
    for event in events {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(err) => log::error!("Failed to serialize {event:?}: {err}"),
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            log::warn!("Bad seed {:?} ({err}); using entropy", args[1]);
            entropy_seed()
        }
        None => entropy_seed(),
    };
    let config = load_config(args.get(2).map(String::as_str));
    let ending_frames = (config.ending_delay_secs / FRAME_DT).ceil() as u64;

    log::info!("Fruit Catch (headless) starting, seed {seed}");
    let mut state = RoundState::new(config, seed);
    state.on_round_start_signal();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut frames = 0u64;
    let mut ending_frames_left = ending_frames;
    while state.phase != GamePhase::Result && frames < MAX_FRAMES {
        match state.phase {
            GamePhase::Playing => tick(&mut state, &input, FRAME_DT),
            GamePhase::Ending => {
                // Stand-in for the "finish" banner animation
                if ending_frames_left == 0 {
                    state.on_result_advance_requested();
                } else {
                    ending_frames_left -= 1;
                }
            }
            GamePhase::Ready | GamePhase::Result => {}
        }
        emit(state.drain_events());
        frames += 1;
    }

    log::info!("Final score: {} ({frames} frames)", state.score());
}
