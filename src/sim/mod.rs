//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time step supplied by the caller (clamped, never read from a clock)
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Aabb, first_collision, obstacle_bounds, player_bounds};
pub use obstacle::{Obstacle, ObstacleShape, ShellId, ShellPool};
pub use snapshot::{ObstacleView, PlayerView, RenderSnapshot};
pub use spawn::{advance_obstacles, recycle_all, spawn_obstacle, update_spawner};
pub use state::{GameEvent, GamePhase, GameState, Player, Pose, GROUND_PALETTE};
pub use tick::{Command, TickInput, clamp_dt, substep_count, tick};
