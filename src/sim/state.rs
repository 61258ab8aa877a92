//! Game state and core simulation types
//!
//! The state owns everything the tick mutates. Hosts read it (or a
//! [`RenderSnapshot`](super::RenderSnapshot)) and steer it only through the
//! control methods on [`GameState`].

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ShellId, ShellPool};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing
    Running,
    /// Player hit an obstacle; frozen until restart
    GameOver,
}

/// Vertical state of the player. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pose {
    Grounded,
    Airborne,
    Sliding { remaining: f32 },
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Target lane (0..lanes)
    pub lane: usize,
    /// x eases toward the lane, y is the box center, z stays at 0
    pub pos: Vec3,
    /// Vertical velocity (only non-zero while airborne)
    pub vy: f32,
    pub pose: Pose,
}

impl Player {
    /// Standing in the center lane
    pub fn new(tuning: &Tuning) -> Self {
        let lane = tuning.center_lane();
        Self {
            lane,
            pos: Vec3::new(tuning.lane_x(lane), tuning.player_height / 2.0, 0.0),
            vy: 0.0,
            pose: Pose::Grounded,
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        !matches!(self.pose, Pose::Airborne)
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        matches!(self.pose, Pose::Sliding { .. })
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        matches!(self.pose, Pose::Airborne)
    }

    /// Vertical scale of the player's body (shrinks while sliding)
    pub fn height_scale(&self, tuning: &Tuning) -> f32 {
        if self.is_sliding() {
            tuning.slide_scale
        } else {
            1.0
        }
    }

    /// Shift the target lane by `dir`, clamped to the track
    pub fn move_lane(&mut self, dir: i32, lanes: usize) {
        let max = lanes.saturating_sub(1) as i64;
        self.lane = (self.lane as i64 + dir as i64).clamp(0, max) as usize;
    }

    /// Start a jump. Only from [`Pose::Grounded`].
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.pose != Pose::Grounded {
            return false;
        }
        self.vy = tuning.jump_speed;
        self.pose = Pose::Airborne;
        true
    }

    /// Start a slide. Only from [`Pose::Grounded`].
    pub fn slide(&mut self, tuning: &Tuning) -> bool {
        if self.pose != Pose::Grounded {
            return false;
        }
        self.pose = Pose::Sliding {
            remaining: tuning.slide_duration,
        };
        self.pos.y = tuning.player_height * tuning.slide_scale / 2.0;
        true
    }

    /// Advance jump arc and slide timer
    pub fn update_vertical(&mut self, tuning: &Tuning, dt: f32) {
        let ground_y = tuning.player_height / 2.0;
        match self.pose {
            Pose::Airborne => {
                self.vy += tuning.gravity * dt;
                self.pos.y += self.vy * dt;
                if self.pos.y <= ground_y {
                    self.pos.y = ground_y;
                    self.vy = 0.0;
                    self.pose = Pose::Grounded;
                }
            }
            Pose::Sliding { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.pose = Pose::Grounded;
                    self.pos.y = ground_y;
                } else {
                    self.pose = Pose::Sliding { remaining };
                }
            }
            Pose::Grounded => {}
        }
    }

    /// Ease x toward the target lane's centerline
    pub fn ease_lateral(&mut self, tuning: &Tuning, dt: f32) {
        let target = tuning.lane_x(self.lane);
        let blend = (tuning.lane_blend_rate * dt).min(1.0);
        self.pos.x += (target - self.pos.x) * blend;
    }
}

/// Things that happened during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { shell: ShellId, lane: usize },
    ObstacleRecycled { shell: ShellId },
    DisplayScoreChanged { score: u64 },
    GameOver { score: u64, hit: ShellId },
    /// A new run began; every earlier obstacle is gone
    Restarted,
}

/// Palette for the cosmetic ground colour
pub const GROUND_PALETTE: [u32; 6] = [
    0xA9A9A9, // Dark gray
    0x808080, // Gray
    0xB5651D, // Brown
    0xD2B48C, // Tan
    0xC0C0C0, // Silver
    0x708090, // Slate gray
];

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    pub pool: ShellPool,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Seconds between the last spawn and the next
    pub spawn_interval: f32,
    pub forward_speed: f32,
    /// Raw score accumulator
    pub score: f32,
    /// `score / score_bucket`, floored
    pub display_score: u64,
    /// Seconds simulated in this run
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cosmetic ground colour (0xRRGGBB)
    pub ground_color: u32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::from_valid_tuning(seed, Tuning::default())
    }

    /// Create a new run with custom tuning, rejecting values the simulation
    /// cannot run with (zero lanes, upward gravity, ...)
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_valid_tuning(seed, tuning))
    }

    fn from_valid_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ground_color = GROUND_PALETTE[rng.random_range(0..GROUND_PALETTE.len())];
        Self {
            seed,
            rng,
            player: Player::new(&tuning),
            phase: GamePhase::Running,
            obstacles: Vec::new(),
            pool: ShellPool::new(),
            spawn_timer: 0.0,
            spawn_interval: tuning.spawn_interval_initial,
            forward_speed: tuning.base_forward_speed,
            score: 0.0,
            display_score: 0,
            elapsed: 0.0,
            time_ticks: 0,
            ground_color,
            events: Vec::new(),
            tuning,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    // === Control surface. All are silent no-ops when they don't apply. ===

    pub fn move_left(&mut self) {
        if self.is_running() {
            self.player.move_lane(-1, self.tuning.lanes);
        }
    }

    pub fn move_right(&mut self) {
        if self.is_running() {
            self.player.move_lane(1, self.tuning.lanes);
        }
    }

    pub fn jump(&mut self) {
        if self.is_running() {
            self.player.jump(&self.tuning);
        }
    }

    pub fn slide(&mut self) {
        if self.is_running() {
            self.player.slide(&self.tuning);
        }
    }

    /// Start a fresh run after game over. Ignored while running.
    ///
    /// Every live obstacle goes back to the pool regardless of position.
    pub fn restart(&mut self) {
        if !self.is_game_over() {
            log::debug!("Restart ignored: run still in progress");
            return;
        }
        super::spawn::recycle_all(self);
        self.events.clear();
        self.events.push(GameEvent::Restarted);
        self.phase = GamePhase::Running;
        self.score = 0.0;
        self.display_score = 0;
        self.elapsed = 0.0;
        self.forward_speed = self.tuning.base_forward_speed;
        self.spawn_timer = 0.0;
        self.spawn_interval = self.tuning.spawn_interval_initial;
        self.player = Player::new(&self.tuning);
        log::info!("Run restarted ({} shells pooled)", self.pool.capacity());
    }

    /// Put an obstacle on the track at an exact spot
    ///
    /// The shell comes from the pool like a regular spawn, so its shape is
    /// still random; position and speed are not.
    pub fn place_obstacle(&mut self, lane: usize, y: f32, z: f32, speed: f32) -> ShellId {
        let lane = lane.min(self.tuning.lanes.saturating_sub(1));
        let shell = self.pool.acquire(&mut self.rng);
        self.obstacles.push(Obstacle {
            shell,
            lane,
            pos: Vec3::new(self.tuning.lane_x(lane), y, z),
            speed,
        });
        shell
    }

    /// Player's target lane
    #[inline]
    pub fn lane(&self) -> usize {
        self.player.lane
    }
}
