//! Lane Runner entry point
//!
//! In the browser the page drives the game through `RunnerApp`. Natively
//! this runs a headless autopilot session and reports the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::sim::{GameEvent, GameState, TickInput, autopilot, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    log::info!("Lane Runner (native, headless) seed={} limit={}s", seed, max_seconds);

    let dt = 1.0 / 60.0;
    let mut state = GameState::new(seed);
    let mut input = TickInput::default();
    let mut spawned = 0usize;
    let mut recycled = 0usize;

    while state.is_running() && state.elapsed < max_seconds {
        input.clear();
        if let Some(command) = autopilot(&state) {
            input.push(command);
        }
        tick(&mut state, &input, dt);

        for event in &state.events {
            match event {
                GameEvent::ObstacleSpawned { .. } => spawned += 1,
                GameEvent::ObstacleRecycled { .. } => recycled += 1,
                GameEvent::DisplayScoreChanged { score } => log::debug!("Score {}", score),
                GameEvent::GameOver { score, hit } => {
                    log::info!("Hit shell {:?} with score {}", hit, score)
                }
                GameEvent::Restarted => {}
            }
        }
    }

    println!(
        "seed {}: {} after {:.1}s, score {} ({:.0} raw), speed {:.1}, {} spawned, {} recycled, {} shells pooled",
        seed,
        if state.is_game_over() { "crashed" } else { "survived" },
        state.elapsed,
        state.display_score,
        state.score,
        state.forward_speed,
        spawned,
        recycled,
        state.pool.capacity(),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is RunnerApp, this is just to satisfy the compiler
}
