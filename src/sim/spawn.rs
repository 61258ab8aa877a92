//! Obstacle spawning, advancing and recycling

use glam::Vec3;
use rand::Rng;

use super::obstacle::Obstacle;
use super::state::{GameEvent, GameState};

/// Count down to the next spawn; spawn when the interval has passed
pub fn update_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer > state.spawn_interval {
        spawn_obstacle(state);
        state.spawn_timer = 0.0;
        let jitter = state.rng.random::<f32>();
        state.spawn_interval = state.tuning.spawn_interval(state.score, jitter);
    }
}

/// Put a new obstacle far down a random lane
pub fn spawn_obstacle(state: &mut GameState) {
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let lane = rng.random_range(0..tuning.lanes);
    let shell = state.pool.acquire(rng);
    let y = tuning.spawn_y + rng.random::<f32>() * tuning.spawn_y_jitter;
    let z = tuning.spawn_z - rng.random::<f32>() * tuning.spawn_z_jitter;
    let speed = state.forward_speed + rng.random::<f32>() * tuning.obstacle_speed_bonus;

    state.obstacles.push(Obstacle {
        shell,
        lane,
        pos: Vec3::new(tuning.lane_x(lane), y, z),
        speed,
    });
    state.events.push(GameEvent::ObstacleSpawned { shell, lane });
    log::debug!(
        "Spawned shell {} in lane {} at z={:.1} speed={:.1}",
        shell.0,
        lane,
        z,
        speed
    );
}

/// Move obstacles toward the player; recycle the ones that passed
pub fn advance_obstacles(state: &mut GameState, dt: f32) {
    let despawn_z = state.tuning.despawn_z;
    let pool = &mut state.pool;
    let events = &mut state.events;

    state.obstacles.retain_mut(|ob| {
        ob.pos.z += ob.speed * dt;
        if ob.pos.z > despawn_z {
            pool.release(ob.shell);
            events.push(GameEvent::ObstacleRecycled { shell: ob.shell });
            false
        } else {
            true
        }
    });
}

/// Send every live obstacle back to the pool
pub fn recycle_all(state: &mut GameState) {
    for ob in state.obstacles.drain(..) {
        state.pool.release(ob.shell);
    }
}
