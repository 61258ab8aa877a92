//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here, so a run can be
//! rebalanced from a JSON file without recompiling. Missing fields fall back
//! to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    pub lanes: usize,
    pub lane_offset: f32,
    /// Lateral easing rate toward the target lane (1/s)
    pub lane_blend_rate: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Negative: pulls the player back to the ground
    pub gravity: f32,
    pub jump_speed: f32,
    pub slide_duration: f32,
    /// Vertical scale of the player while sliding (0-1]
    pub slide_scale: f32,

    // === World speed ===
    pub base_forward_speed: f32,
    pub forward_accel: f32,

    // === Obstacles ===
    pub spawn_z: f32,
    pub spawn_z_jitter: f32,
    pub spawn_y: f32,
    pub spawn_y_jitter: f32,
    pub despawn_z: f32,
    pub obstacle_speed_bonus: f32,

    // === Spawn cadence ===
    pub spawn_interval_initial: f32,
    pub spawn_interval_floor: f32,
    pub spawn_interval_base: f32,
    pub spawn_interval_jitter: f32,
    pub score_relief_cap: f32,
    pub score_relief_divisor: f32,

    // === Scoring ===
    pub score_rate: f32,
    pub score_bucket: f32,

    /// Largest accepted time step (seconds)
    pub max_dt: f32,
    /// Obstacle travel per substep; ticks are split to stay under it
    pub max_step_travel: f32,
    pub max_substeps: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: LANES,
            lane_offset: LANE_OFFSET,
            lane_blend_rate: LANE_BLEND_RATE,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_speed: JUMP_V,
            slide_duration: SLIDE_DURATION,
            slide_scale: SLIDE_SCALE,

            base_forward_speed: BASE_FORWARD_SPEED,
            forward_accel: FORWARD_ACCEL,

            spawn_z: SPAWN_Z,
            spawn_z_jitter: SPAWN_Z_JITTER,
            spawn_y: SPAWN_Y,
            spawn_y_jitter: SPAWN_Y_JITTER,
            despawn_z: DESPAWN_Z,
            obstacle_speed_bonus: OBSTACLE_SPEED_BONUS,

            spawn_interval_initial: SPAWN_INTERVAL_INITIAL,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_jitter: SPAWN_INTERVAL_JITTER,
            score_relief_cap: SCORE_RELIEF_CAP,
            score_relief_divisor: SCORE_RELIEF_DIVISOR,

            score_rate: SCORE_RATE,
            score_bucket: SCORE_BUCKET,

            max_dt: MAX_DT,
            max_step_travel: MAX_STEP_TRAVEL,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({} lanes)", tuning.lanes);
        Ok(tuning)
    }

    /// Parse a tuning document, falling back to defaults if it is rejected
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning: {}", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }

        check(self.lanes > 0, "lanes", "must be at least 1")?;
        check(self.lane_offset > 0.0, "lane_offset", "must be positive")?;
        check(self.lane_blend_rate > 0.0, "lane_blend_rate", "must be positive")?;
        check(self.player_width > 0.0, "player_width", "must be positive")?;
        check(self.player_height > 0.0, "player_height", "must be positive")?;
        check(self.gravity < 0.0, "gravity", "must be negative")?;
        check(self.jump_speed > 0.0, "jump_speed", "must be positive")?;
        check(self.slide_duration > 0.0, "slide_duration", "must be positive")?;
        check(
            self.slide_scale > 0.0 && self.slide_scale <= 1.0,
            "slide_scale",
            "must be in (0, 1]",
        )?;
        check(self.base_forward_speed > 0.0, "base_forward_speed", "must be positive")?;
        check(self.forward_accel >= 0.0, "forward_accel", "must not be negative")?;
        check(self.spawn_z < 0.0, "spawn_z", "must be ahead of the player (negative)")?;
        check(self.despawn_z > 0.0, "despawn_z", "must be behind the player (positive)")?;
        check(self.spawn_z_jitter >= 0.0, "spawn_z_jitter", "must not be negative")?;
        check(self.spawn_y_jitter >= 0.0, "spawn_y_jitter", "must not be negative")?;
        check(
            self.obstacle_speed_bonus >= 0.0,
            "obstacle_speed_bonus",
            "must not be negative",
        )?;
        check(
            self.spawn_interval_initial > 0.0,
            "spawn_interval_initial",
            "must be positive",
        )?;
        check(self.spawn_interval_floor > 0.0, "spawn_interval_floor", "must be positive")?;
        check(
            self.spawn_interval_jitter >= 0.0,
            "spawn_interval_jitter",
            "must not be negative",
        )?;
        check(self.score_relief_cap >= 0.0, "score_relief_cap", "must not be negative")?;
        check(
            self.score_relief_divisor > 0.0,
            "score_relief_divisor",
            "must be positive",
        )?;
        check(
            self.spawn_interval_base - self.score_relief_cap >= 0.0,
            "spawn_interval_base",
            "must be at least score_relief_cap",
        )?;
        check(self.score_rate >= 0.0, "score_rate", "must not be negative")?;
        check(self.score_bucket > 0.0, "score_bucket", "must be positive")?;
        check(self.max_dt > 0.0, "max_dt", "must be positive")?;
        check(self.max_step_travel > 0.0, "max_step_travel", "must be positive")?;
        check(self.max_substeps > 0, "max_substeps", "must be at least 1")?;
        Ok(())
    }

    /// Seconds until the next spawn
    ///
    /// `jitter` is a uniform sample in [0, 1). Denser as score grows, never
    /// below `spawn_interval_floor`.
    pub fn spawn_interval(&self, score: f32, jitter: f32) -> f32 {
        let relief = (score.max(0.0) / self.score_relief_divisor).min(self.score_relief_cap);
        let raw = self.spawn_interval_base + jitter * self.spawn_interval_jitter - relief;
        raw.max(self.spawn_interval_floor)
    }

    /// Lateral offset of a lane's centerline
    #[inline]
    pub fn lane_x(&self, lane: usize) -> f32 {
        crate::lane_x(lane, self.lanes, self.lane_offset)
    }

    /// Index of the middle lane (rounded down for even lane counts)
    ///
    /// Needs `lanes >= 1`, which [`Tuning::validate`] guarantees.
    #[inline]
    pub fn center_lane(&self) -> usize {
        (self.lanes - 1) / 2
    }
}
