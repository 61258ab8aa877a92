//! Obstacles and the pool of reusable obstacle shells
//!
//! A shell is the long-lived part of an obstacle: its shape (and therefore
//! the render adapter's mesh). Shells live in an arena and are handed out by
//! index; a live [`Obstacle`] only borrows one by [`ShellId`] and gives it
//! back when it leaves the track.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Index of a shell in the [`ShellPool`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShellId(pub u32);

/// Obstacle silhouettes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Solid box, 1.2-2.8 wide and 1.0-2.6 tall
    Crate { width: f32, height: f32 },
    /// Upright cylinder of radius 0.5, 2-4 tall
    Pillar { height: f32 },
    /// Wide flat board (3 x 0.3 x 1)
    Plank,
    /// Two 0.3 x 2 legs joined by a short bar
    HFrame,
    /// Two tall pillars hanging below a top bar
    Arch,
}

/// Number of shape kinds
pub const SHAPE_KINDS: u32 = 5;

impl ObstacleShape {
    /// Pick a shape (and its random proportions)
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..SHAPE_KINDS) {
            0 => ObstacleShape::Crate {
                width: 1.2 + rng.random::<f32>() * 1.6,
                height: 1.0 + rng.random::<f32>() * 1.6,
            },
            1 => ObstacleShape::Pillar {
                height: 2.0 + rng.random::<f32>() * 2.0,
            },
            2 => ObstacleShape::Plank,
            3 => ObstacleShape::HFrame,
            _ => ObstacleShape::Arch,
        }
    }

    /// Stable numeric identifier for renderers
    pub fn kind_id(&self) -> u32 {
        match self {
            ObstacleShape::Crate { .. } => 0,
            ObstacleShape::Pillar { .. } => 1,
            ObstacleShape::Plank => 2,
            ObstacleShape::HFrame => 3,
            ObstacleShape::Arch => 4,
        }
    }

    /// Bounds relative to the obstacle's origin
    pub fn local_bounds(&self) -> Aabb {
        match *self {
            ObstacleShape::Crate { width, height } => {
                Aabb::from_center_size(Vec3::ZERO, Vec3::new(width, height, 1.0))
            }
            ObstacleShape::Pillar { height } => {
                Aabb::from_center_size(Vec3::ZERO, Vec3::new(1.0, height, 1.0))
            }
            ObstacleShape::Plank => Aabb::from_center_size(Vec3::ZERO, Vec3::new(3.0, 0.3, 1.0)),
            // Legs at x = ±0.5 (0.3 wide, 2 tall); the bar sits inside them
            ObstacleShape::HFrame => Aabb {
                min: Vec3::new(-0.65, -1.0, -0.5),
                max: Vec3::new(0.65, 1.0, 0.5),
            },
            // Pillars 5 tall centered at y = -0.85; top bar at y = 0.15
            ObstacleShape::Arch => Aabb {
                min: Vec3::new(-0.65, -3.35, -0.5),
                max: Vec3::new(0.65, 1.65, 0.5),
            },
        }
    }
}

/// An obstacle on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub shell: ShellId,
    pub lane: usize,
    /// x: lane offset, y: height of the origin, z: distance along the track
    /// (negative = ahead of the player)
    pub pos: Vec3,
    /// Fixed when spawned
    pub speed: f32,
}

/// Arena of obstacle shells with a free list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellPool {
    shapes: Vec<ObstacleShape>,
    free: Vec<ShellId>,
}

impl ShellPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a free shell, or build a new one when none is idle
    pub fn acquire<R: Rng>(&mut self, rng: &mut R) -> ShellId {
        if let Some(id) = self.free.pop() {
            return id;
        }
        let id = ShellId(self.shapes.len() as u32);
        self.shapes.push(ObstacleShape::random(rng));
        log::debug!("Built obstacle shell {} ({} total)", id.0, self.shapes.len());
        id
    }

    /// Return a shell for reuse
    pub fn release(&mut self, id: ShellId) {
        debug_assert!((id.0 as usize) < self.shapes.len(), "unknown shell {:?}", id);
        debug_assert!(!self.free.contains(&id), "shell {:?} released twice", id);
        self.free.push(id);
    }

    pub fn shape(&self, id: ShellId) -> ObstacleShape {
        self.shapes[id.0 as usize]
    }

    /// Shells ever built (live + idle)
    pub fn capacity(&self) -> usize {
        self.shapes.len()
    }

    /// Idle shells waiting for reuse
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    pub fn is_idle(&self, id: ShellId) -> bool {
        self.free.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pool_reuses_released_shells() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = ShellPool::new();

        let a = pool.acquire(&mut rng);
        let b = pool.acquire(&mut rng);
        assert_ne!(a, b);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.idle(), 0);

        let shape_a = pool.shape(a);
        pool.release(a);
        assert_eq!(pool.idle(), 1);
        assert!(pool.is_idle(a));

        // Reacquire hands back the same shell with the same shape
        let c = pool.acquire(&mut rng);
        assert_eq!(c, a);
        assert_eq!(pool.shape(c), shape_a);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_random_shapes_cover_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; SHAPE_KINDS as usize];
        for _ in 0..500 {
            let shape = ObstacleShape::random(&mut rng);
            seen[shape.kind_id() as usize] = true;
            if let ObstacleShape::Crate { width, height } = shape {
                assert!((1.2..=2.8).contains(&width));
                assert!((1.0..=2.6).contains(&height));
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_local_bounds_are_centered_horizontally() {
        for shape in [
            ObstacleShape::Crate {
                width: 2.0,
                height: 1.5,
            },
            ObstacleShape::Pillar { height: 3.0 },
            ObstacleShape::Plank,
            ObstacleShape::HFrame,
            ObstacleShape::Arch,
        ] {
            let b = shape.local_bounds();
            assert!((b.min.x + b.max.x).abs() < 1e-6, "{:?}", shape);
            assert!((b.min.z + b.max.z).abs() < 1e-6, "{:?}", shape);
            assert!(b.max.y > 0.0);
        }
    }
}
