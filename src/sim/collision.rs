//! Collision detection with axis-aligned boxes
//!
//! Player and obstacles are both approximated by AABBs. Touching faces count
//! as a hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ShellId, ShellPool};
use super::state::Player;
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Interval overlap on all three axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// The player's box: fixed footprint, height shrinks while sliding
pub fn player_bounds(player: &Player, tuning: &Tuning) -> Aabb {
    let height = tuning.player_height * player.height_scale(tuning);
    Aabb::from_center_size(
        player.pos,
        Vec3::new(tuning.player_width, height, tuning.player_width),
    )
}

/// An obstacle's box in world space
pub fn obstacle_bounds(obstacle: &Obstacle, pool: &ShellPool) -> Aabb {
    pool.shape(obstacle.shell).local_bounds().translated(obstacle.pos)
}

/// First obstacle overlapping the player, if any
///
/// Stops at the first hit; which obstacle is reported when several overlap
/// is not meaningful.
pub fn first_collision(
    player: &Player,
    obstacles: &[Obstacle],
    pool: &ShellPool,
    tuning: &Tuning,
) -> Option<ShellId> {
    let player_box = player_bounds(player, tuning);
    obstacles
        .iter()
        .find(|ob| obstacle_bounds(ob, pool).intersects(&player_box))
        .map(|ob| ob.shell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleShape;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn unit_box(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, Vec3::ONE)
    }

    #[test]
    fn test_aabb_overlap() {
        let a = unit_box(Vec3::ZERO);
        assert!(a.intersects(&unit_box(Vec3::new(0.5, 0.5, 0.5))));
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_aabb_touching_counts() {
        let a = unit_box(Vec3::ZERO);
        assert!(a.intersects(&unit_box(Vec3::new(1.0, 0.0, 0.0))));
    }

    #[test]
    fn test_aabb_separated_on_single_axis() {
        let a = unit_box(Vec3::ZERO);
        // Overlapping on two axes is not enough
        assert!(!a.intersects(&unit_box(Vec3::new(1.01, 0.0, 0.0))));
        assert!(!a.intersects(&unit_box(Vec3::new(0.0, -1.5, 0.0))));
        assert!(!a.intersects(&unit_box(Vec3::new(0.2, 0.2, 3.0))));
    }

    #[test]
    fn test_aabb_center_and_size() {
        let b = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.min, Vec3::ZERO);
    }

    #[test]
    fn test_sliding_player_is_shorter() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let standing = player_bounds(&player, &tuning);
        assert!((standing.size().y - tuning.player_height).abs() < 1e-6);
        assert!(standing.min.y.abs() < 1e-6);

        assert!(player.slide(&tuning));
        let sliding = player_bounds(&player, &tuning);
        assert!((sliding.size().y - tuning.player_height * tuning.slide_scale).abs() < 1e-6);
        // Still standing on the ground
        assert!(sliding.min.y.abs() < 1e-6);
    }

    #[test]
    fn test_slide_under_high_plank() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = ShellPool::new();
        // Find a plank shell
        let shell = loop {
            let id = pool.acquire(&mut rng);
            if pool.shape(id) == ObstacleShape::Plank {
                break id;
            }
        };
        let mut player = Player::new(&tuning);
        // Plank spans y 0.75..1.05, above a sliding player (0..0.55)
        let plank = Obstacle {
            shell,
            lane: 1,
            pos: Vec3::new(0.0, 0.9, 0.0),
            speed: 12.0,
        };
        let obstacles = [plank];
        assert_eq!(
            first_collision(&player, &obstacles, &pool, &tuning),
            Some(shell)
        );
        player.slide(&tuning);
        assert_eq!(first_collision(&player, &obstacles, &pool, &tuning), None);
    }
}
