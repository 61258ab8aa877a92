//! End-to-end runs through the public API

use lane_runner::Tuning;
use lane_runner::sim::{Command, GameEvent, GameState, Pose, TickInput, tick};

const DT: f32 = 1.0 / 60.0;

/// Fresh run with the spawner switched off
fn quiet_run_with(seed: u64, tuning: Tuning) -> GameState {
    let mut state = GameState::with_tuning(seed, tuning).expect("valid tuning");
    state.spawn_interval = f32::INFINITY;
    state
}

fn quiet_run(seed: u64) -> GameState {
    quiet_run_with(seed, Tuning::default())
}

fn put_player_in_lane(state: &mut GameState, lane: usize) {
    state.player.lane = lane;
    state.player.pos.x = state.tuning.lane_x(lane);
}

#[test]
fn jump_lands_within_a_second() {
    let mut state = quiet_run(3);
    let mut input = TickInput::default();
    input.push(Command::Jump);
    tick(&mut state, &input, DT);
    input.clear();

    let mut peak: f32 = 0.0;
    for _ in 1..60 {
        tick(&mut state, &input, DT);
        peak = peak.max(state.player.pos.y);
    }

    assert!(state.is_running());
    assert!(peak > 2.0, "never left the ground: {}", peak);
    assert_eq!(state.player.pose, Pose::Grounded);
    assert_eq!(state.player.vy, 0.0);
    assert!((state.player.pos.y - state.tuning.player_height / 2.0).abs() < 1e-5);
}

#[test]
fn obstacle_in_player_lane_collides_before_despawn() {
    let mut state = quiet_run(11);
    put_player_in_lane(&mut state, 0);
    let shell = state.place_obstacle(0, 0.5, -60.0, 12.0);
    let input = TickInput::default();

    let mut hit = None;
    for _ in 0..(8.0 / DT) as usize {
        tick(&mut state, &input, DT);
        if let Some(GameEvent::GameOver { hit: id, .. }) = state
            .events
            .iter()
            .find(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            hit = Some(*id);
            break;
        }
    }

    assert_eq!(hit, Some(shell));
    assert!(state.is_game_over());
    let ob = &state.obstacles[0];
    assert!(ob.pos.z <= state.tuning.despawn_z);
}

#[test]
fn obstacle_in_other_lane_recycles_after_passing() {
    let mut state = quiet_run(5);
    let shell = state.place_obstacle(2, 0.5, -60.0, 12.0);
    let input = TickInput::default();

    let mut recycled_at = None;
    for _ in 0..(8.0 / DT) as usize {
        tick(&mut state, &input, DT);
        if state
            .events
            .contains(&GameEvent::ObstacleRecycled { shell })
        {
            recycled_at = Some(state.elapsed);
            break;
        }
    }

    // 72 units of track at 12 units/s
    let t = recycled_at.expect("obstacle never recycled");
    assert!((t - 6.0).abs() < 0.05, "recycled at {}", t);
    assert!(state.is_running());
    assert!(state.obstacles.is_empty());
    assert!(state.pool.is_idle(shell));
}

#[test]
fn score_freezes_on_game_over_and_resets_on_restart() {
    let mut state = quiet_run(8);
    put_player_in_lane(&mut state, 1);
    state.place_obstacle(1, 0.5, -10.0, 12.0);
    let input = TickInput::default();

    while state.is_running() {
        tick(&mut state, &input, DT);
    }
    let frozen = state.score;
    assert!(frozen > 0.0);

    for _ in 0..120 {
        tick(&mut state, &input, DT);
    }
    assert_eq!(state.score, frozen);
    assert!(state.events.is_empty());

    state.restart();
    assert!(state.is_running());
    assert!(state.events.contains(&GameEvent::Restarted));
    assert_eq!(state.score, 0.0);
    assert_eq!(state.display_score, 0);
    assert!(state.obstacles.is_empty());
    assert_eq!(state.lane(), 1);

    tick(&mut state, &input, DT);
    assert!(state.score > 0.0);
}

#[test]
fn fast_obstacle_still_hits() {
    let mut state = quiet_run(17);
    state.forward_speed = 100.0;
    let shell = state.place_obstacle(1, 0.5, -60.8, 100.0);
    let input = TickInput::default();

    let mut closest = f32::INFINITY;
    for _ in 0..120 {
        tick(&mut state, &input, DT);
        if let Some(ob) = state.obstacles.first() {
            closest = closest.min(ob.pos.z.abs());
        }
        if state.is_game_over() {
            break;
        }
    }

    assert!(state.is_game_over(), "passed through, closest |z| = {}", closest);
    assert!(
        state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { hit, .. } if *hit == shell))
    );
}

#[test]
fn fast_obstacle_hits_at_clamped_dt() {
    // A stalled device feeds max_dt every frame
    let mut state = quiet_run(18);
    state.forward_speed = 60.0;
    state.place_obstacle(1, 0.5, -40.3, 60.0);
    let input = TickInput::default();
    for _ in 0..60 {
        tick(&mut state, &input, 0.25);
        if state.is_game_over() {
            break;
        }
    }
    assert!(state.is_game_over());
}

#[test]
fn five_lane_run() {
    let tuning = Tuning {
        lanes: 5,
        lane_offset: 2.0,
        ..Tuning::default()
    };
    let mut state = quiet_run_with(31, tuning);
    assert_eq!(state.lane(), 2);
    assert_eq!(state.player.pos.x, 0.0);

    // Walk to the far left lane and let the easing settle
    let mut input = TickInput::default();
    for _ in 0..4 {
        input.push(Command::MoveLeft);
    }
    tick(&mut state, &input, DT);
    assert_eq!(state.lane(), 0);
    let idle = TickInput::default();
    for _ in 0..60 {
        tick(&mut state, &idle, DT);
    }
    assert!((state.player.pos.x - -4.0).abs() < 1e-3);

    // Obstacles one and four lanes over never touch the player
    state.place_obstacle(1, 0.5, -20.0, 12.0);
    state.place_obstacle(4, 0.5, -20.0, 12.0);
    let lane0 = state.place_obstacle(0, 0.5, -30.0, 12.0);
    let mut hit = None;
    for _ in 0..(4.0 / DT) as usize {
        tick(&mut state, &idle, DT);
        if let Some(GameEvent::GameOver { hit: id, .. }) = state
            .events
            .iter()
            .find(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            hit = Some(*id);
            break;
        }
    }
    assert_eq!(hit, Some(lane0));

    state.restart();
    assert_eq!(state.lane(), 2);
    assert_eq!(state.player.pos.x, 0.0);
}

#[test]
fn controls_ignored_after_game_over() {
    let mut state = quiet_run(21);
    put_player_in_lane(&mut state, 1);
    state.place_obstacle(1, 0.5, -5.0, 12.0);
    let idle = TickInput::default();
    while state.is_running() {
        tick(&mut state, &idle, DT);
    }

    let lane = state.lane();
    let y = state.player.pos.y;
    let mut input = TickInput::default();
    input.push(Command::MoveLeft);
    input.push(Command::Jump);
    tick(&mut state, &input, DT);

    assert_eq!(state.lane(), lane);
    assert_eq!(state.player.pos.y, y);
    assert_eq!(state.player.pose, Pose::Grounded);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut state = GameState::with_tuning(seed, Tuning::default()).expect("valid tuning");
        let input = TickInput::default();
        for _ in 0..600 {
            tick(&mut state, &input, DT);
        }
        serde_json::to_string(&state.snapshot()).expect("snapshot serializes")
    };
    assert_eq!(run(42), run(42));
}
