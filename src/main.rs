//! Snake Abyss entry point
//!
//! The browser build is driven through the library's `web` bindings. Natively
//! this runs a headless session with a scripted pilot and logs how it went.
//!
//! Usage: `snake-abyss [seed] [config.json] [frame|step]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snake_abyss::GameConfig;
    use snake_abyss::config::CollisionCadence;
    use snake_abyss::sim::{GameEvent, ManualClock, TickInput, WorldState, run_frame};

    env_logger::init();
    log::info!("Snake Abyss (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(42);
    let mut config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Falling back to default config ({}): {}", path, e);
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };
    if let Some(arg) = args.next() {
        match CollisionCadence::from_str(&arg) {
            Some(cadence) => config.collision_cadence = cadence,
            None => log::warn!("Unknown collision cadence {:?}, keeping {}", arg, config.collision_cadence.as_str()),
        }
    }

    let mut state = WorldState::new(config, seed);
    let mut clock = ManualClock::new(16.0);
    let mut eaten = 0usize;

    // Slow circling sweep with a gentle bob
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    for frame in 0..MAX_FRAMES {
        let t = frame as f32 / 60.0;
        let input = TickInput::from_controls(t * 0.4, 0.5 + (t * 0.7).sin() * 0.2);
        run_frame(&mut state, &input, &mut clock);

        for event in state.drain_events() {
            if let GameEvent::Ate { .. } = event {
                eaten += 1;
            }
        }

        if frame % 600 == 0 {
            log::info!(
                "t={:.0}s score={} length={} head={:?}",
                clock.now() / 1000.0,
                state.score,
                state.body_len(),
                state.head()
            );
        }
        if state.is_game_over() {
            break;
        }
    }

    println!(
        "Seed {}: score {}, length {}, {} things eaten, {} ticks over {} ms{}",
        seed,
        state.score,
        state.body_len(),
        eaten,
        state.time_ticks,
        clock.now(),
        if state.is_game_over() { " (game over)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::start`, this is just to satisfy the compiler
}
