//! Per-frame simulation tick
//!
//! Core game loop that advances the run by one caller-supplied time step.

use super::collision::first_collision;
use super::spawn::{advance_obstacles, update_spawner};
use super::state::{GameEvent, GamePhase, GameState};

/// Player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
}

/// Input queued by the host since the last tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Applied in order before the step
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl GameState {
    /// Apply one control command (no-op when it doesn't apply)
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Jump => self.jump(),
            Command::Slide => self.slide(),
        }
    }
}

/// Clamp a raw frame delta to what the simulation accepts
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() { 0.0 } else { dt.clamp(0.0, max_dt) }
}

/// Number of substeps needed so no obstacle moves further than
/// `tuning.max_step_travel` in one of them
pub fn substep_count(state: &GameState, dt: f32) -> u32 {
    let fastest = state
        .obstacles
        .iter()
        .map(|ob| ob.speed)
        .fold(state.forward_speed, f32::max);
    let needed = (fastest * dt / state.tuning.max_step_travel).ceil();
    (needed.min(state.tuning.max_substeps as f32) as u32).max(1)
}

/// Advance the game state by `dt` seconds (clamped to `tuning.max_dt`)
///
/// Commands apply once, then the step is split into substeps so fast
/// obstacles cannot pass through the player between collision checks.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Frozen after game over
    if state.phase != GamePhase::Running {
        return;
    }

    let dt = clamp_dt(dt, state.tuning.max_dt);

    for &command in &input.commands {
        state.apply(command);
    }

    state.time_ticks += 1;

    let substeps = substep_count(state, dt);
    let step_dt = dt / substeps as f32;
    for _ in 0..substeps {
        step(state, step_dt);
        if state.phase != GamePhase::Running {
            break;
        }
    }
}

fn step(state: &mut GameState, dt: f32) {
    state.elapsed += dt;

    // Difficulty ramp: no cap
    state.forward_speed += state.tuning.forward_accel * dt;

    advance_obstacles(state, dt);
    update_spawner(state, dt);

    state.player.update_vertical(&state.tuning, dt);
    state.player.ease_lateral(&state.tuning, dt);

    // Scoring
    state.score += state.forward_speed * dt * state.tuning.score_rate;
    let display = (state.score / state.tuning.score_bucket).floor() as u64;
    if display != state.display_score {
        state.display_score = display;
        state
            .events
            .push(GameEvent::DisplayScoreChanged { score: display });
    }

    if let Some(hit) = first_collision(
        &state.player,
        &state.obstacles,
        &state.pool,
        &state.tuning,
    ) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.display_score,
            hit,
        });
        log::info!(
            "Game over: score {} after {:.1}s at speed {:.1}",
            state.display_score,
            state.elapsed,
            state.forward_speed
        );
    }
}
