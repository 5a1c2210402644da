//! Flippy Bird entry point
//!
//! The browser build is driven from `platform::web`; natively this runs a
//! headless autopilot session and reports the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flippy_bird::platform::JsonFileStore;
    use flippy_bird::sim::{GameEvent, GamePhase, Viewport};
    use flippy_bird::{Command, Game, Preferences};

    /// Ten simulated minutes at 60 Hz
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Flippy Bird (native) starting headless autopilot run...");

    // Usage: flippy-bird [seed] [records.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xF1A9);
    let records_path = args
        .next()
        .unwrap_or_else(|| "flippy_bird_records.json".to_string());

    let store = JsonFileStore::new(records_path);
    log::info!("Records file: {}", store.path().display());

    let mut game = Game::new(Viewport::default(), Preferences::default(), Box::new(store), seed);
    log::info!("Spawner seed: {}", game.state().spawner.seed());

    let mut now = 0.0;
    game.command(Command::SetAutopilot(true), now);
    game.command(Command::Restart, now);

    let mut frames = 0;
    while game.is_running() && frames < MAX_FRAMES {
        now += FRAME_MS;
        frames += 1;
        for event in game.frame(now) {
            match event {
                GameEvent::DeathStarted { cause } => {
                    log::info!("Frame {}: death ({:?})", frames, cause)
                }
                GameEvent::GameOver {
                    final_score,
                    new_session_best,
                    new_all_time_best,
                } => {
                    let record = if new_all_time_best {
                        " - new all-time best!"
                    } else if new_session_best {
                        " - new session best"
                    } else {
                        ""
                    };
                    println!("Game over after {} frames: score {}{}", frames, final_score, record);
                }
                _ => {}
            }
        }
    }

    let state = game.state();
    if state.phase != GamePhase::GameOver {
        println!(
            "Still flying after {} frames: score {} ({} obstacles, {} pickups)",
            frames, state.scores.overall, state.scores.obstacles, state.scores.pickups
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
