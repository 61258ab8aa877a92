//! Read-only view of the state for renderers

use serde::Serialize;

use super::obstacle::ObstacleShape;
use super::state::GameState;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Vertical scale to apply to the player mesh
    pub scale_y: f32,
    pub sliding: bool,
    pub airborne: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    /// Stable per shell, so renderers can keep one mesh per id
    pub id: u32,
    pub shape: ObstacleShape,
    pub kind: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub running: bool,
    pub game_over: bool,
    pub score: u64,
    pub forward_speed: f32,
    pub ground_color: u32,
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot {
        let p = &self.player;
        RenderSnapshot {
            player: PlayerView {
                lane: p.lane,
                x: p.pos.x,
                y: p.pos.y,
                z: p.pos.z,
                scale_y: p.height_scale(&self.tuning),
                sliding: p.is_sliding(),
                airborne: p.is_airborne(),
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|ob| {
                    let shape = self.pool.shape(ob.shell);
                    ObstacleView {
                        id: ob.shell.0,
                        shape,
                        kind: shape.kind_id(),
                        x: ob.pos.x,
                        y: ob.pos.y,
                        z: ob.pos.z,
                    }
                })
                .collect(),
            running: self.is_running(),
            game_over: self.is_game_over(),
            score: self.display_score,
            forward_speed: self.forward_speed,
            ground_color: self.ground_color,
        }
    }
}
