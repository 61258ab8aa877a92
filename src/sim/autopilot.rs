//! Idle/demo mode - the game plays itself
//!
//! Looks at the nearest approaching obstacle in each lane and either
//! sidesteps toward the lane with the most warning, or jumps/slides when
//! there is nowhere better to go.

use super::collision::{obstacle_bounds, player_bounds};
use super::state::{GameState, Pose};
use super::tick::Command;

/// Warning (seconds) below which the autopilot starts reacting
const REACTION_TIME: f32 = 0.9;
/// Time to impact at which to jump or slide
const EVADE_TIME: f32 = 0.3;

/// Seconds until the nearest obstacle in `lane` reaches the player, and that
/// obstacle's underside height
fn time_to_impact(state: &GameState, lane: usize) -> (f32, Option<f32>) {
    let player_box = player_bounds(&state.player, &state.tuning);
    let mut best = f32::INFINITY;
    let mut bottom = None;
    for ob in state.obstacles.iter().filter(|ob| ob.lane == lane) {
        let bounds = obstacle_bounds(ob, &state.pool);
        if bounds.min.z > player_box.max.z {
            // Already passed
            continue;
        }
        let gap = (player_box.min.z - bounds.max.z).max(0.0);
        let t = if ob.speed > 0.0 {
            gap / ob.speed
        } else if gap > 0.0 {
            f32::INFINITY
        } else {
            0.0
        };
        if t < best {
            best = t;
            bottom = Some(bounds.min.y);
        }
    }
    (best, bottom)
}

/// Next command for the autopilot, if any
pub fn autopilot(state: &GameState) -> Option<Command> {
    if !state.is_running() {
        return None;
    }

    let lane = state.player.lane;
    let (here, bottom) = time_to_impact(state, lane);
    if here > REACTION_TIME {
        return None;
    }

    let mut best: Option<(Command, f32)> = None;
    if lane > 0 {
        best = Some((Command::MoveLeft, time_to_impact(state, lane - 1).0));
    }
    if lane + 1 < state.tuning.lanes {
        let right = time_to_impact(state, lane + 1).0;
        if best.is_none_or(|(_, left)| right > left) {
            best = Some((Command::MoveRight, right));
        }
    }
    if let Some((command, clearance)) = best {
        if clearance > here && clearance > EVADE_TIME {
            return Some(command);
        }
    }

    if here <= EVADE_TIME && state.player.pose == Pose::Grounded {
        let slide_top = state.tuning.player_height * state.tuning.slide_scale;
        return match bottom {
            Some(bottom) if bottom > slide_top => Some(Command::Slide),
            _ => Some(Command::Jump),
        };
    }
    None
}
