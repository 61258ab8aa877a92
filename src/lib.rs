//! Lane Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser glue (frame loop, input translation)
//!
//! Rendering is left to the host: it reads [`sim::RenderSnapshot`] each frame.

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Number of lanes
    pub const LANES: usize = 3;
    /// Lateral distance between neighbouring lanes
    pub const LANE_OFFSET: f32 = 2.2;

    /// Player box dimensions
    pub const PLAYER_HEIGHT: f32 = 1.0;
    pub const PLAYER_WIDTH: f32 = 0.5;

    /// Vertical kinematics (units/s², units/s)
    pub const GRAVITY: f32 = -30.0;
    pub const JUMP_V: f32 = 12.0;

    /// Slide pose
    pub const SLIDE_DURATION: f32 = 0.8;
    pub const SLIDE_SCALE: f32 = 0.55;

    /// Lateral easing rate toward the target lane (1/s)
    pub const LANE_BLEND_RATE: f32 = 12.0;

    /// World scroll speed at run start, and its growth per second
    pub const BASE_FORWARD_SPEED: f32 = 12.0;
    pub const FORWARD_ACCEL: f32 = 1.0;

    /// Obstacles spawn this far ahead (negative z), minus up to SPAWN_Z_JITTER
    pub const SPAWN_Z: f32 = -60.0;
    pub const SPAWN_Z_JITTER: f32 = 10.0;
    /// Obstacles are recycled once they pass this z behind the player
    pub const DESPAWN_Z: f32 = 12.0;
    /// Spawn height is SPAWN_Y + U[0, SPAWN_Y_JITTER)
    pub const SPAWN_Y: f32 = 0.5;
    pub const SPAWN_Y_JITTER: f32 = 0.4;
    /// Max extra speed an obstacle gets on top of the forward speed
    pub const OBSTACLE_SPEED_BONUS: f32 = 2.0;

    /// Spawn interval (seconds)
    pub const SPAWN_INTERVAL_INITIAL: f32 = 0.9;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.45;
    pub const SPAWN_INTERVAL_BASE: f32 = 0.6;
    pub const SPAWN_INTERVAL_JITTER: f32 = 1.0;
    /// Interval shrinks by min(SCORE_RELIEF_CAP, score / SCORE_RELIEF_DIVISOR)
    pub const SCORE_RELIEF_CAP: f32 = 0.4;
    pub const SCORE_RELIEF_DIVISOR: f32 = 500.0;

    /// Score gained per unit of distance travelled
    pub const SCORE_RATE: f32 = 2.0;
    /// Raw score points per displayed point
    pub const SCORE_BUCKET: f32 = 50.0;

    /// Largest time step the simulation accepts (seconds)
    pub const MAX_DT: f32 = 0.05;
    /// Furthest an obstacle may move relative to the player in one substep.
    /// Must stay below the combined box depth (1.0 + 0.5) or hits are skipped.
    pub const MAX_STEP_TRAVEL: f32 = 1.0;
    /// Maximum substeps per tick
    pub const MAX_SUBSTEPS: u32 = 16;
}

/// Lateral offset of a lane's centerline, with the middle lane at x = 0
#[inline]
pub fn lane_x(lane: usize, lane_count: usize, lane_offset: f32) -> f32 {
    let center = (lane_count as f32 - 1.0) / 2.0;
    (lane as f32 - center) * lane_offset
}
