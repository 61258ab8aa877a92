//! Keyboard and touch translation into [`Command`]s

use crate::sim::Command;

/// Minimum finger travel (pixels) that counts as a swipe
pub const MIN_SWIPE_DISTANCE: f32 = 50.0;

/// Map a `KeyboardEvent.code` to a command
pub fn command_for_key(code: &str) -> Option<Command> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Command::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Command::MoveRight),
        "ArrowUp" | "KeyW" | "Space" => Some(Command::Jump),
        "ArrowDown" | "KeyS" => Some(Command::Slide),
        _ => None,
    }
}

/// Classify a finished swipe by its screen-space travel
///
/// The dominant axis wins; screen y grows downward, so swiping up jumps.
pub fn classify_swipe(dx: f32, dy: f32) -> Option<Command> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= MIN_SWIPE_DISTANCE {
            None
        } else if dx > 0.0 {
            Some(Command::MoveRight)
        } else {
            Some(Command::MoveLeft)
        }
    } else if dy.abs() <= MIN_SWIPE_DISTANCE {
        None
    } else if dy < 0.0 {
        Some(Command::Jump)
    } else {
        Some(Command::Slide)
    }
}

/// Tracks one touch from start to end
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the touch; `None` for taps and touches that never began
    pub fn end(&mut self, x: f32, y: f32) -> Option<Command> {
        let (sx, sy) = self.start.take()?;
        classify_swipe(x - sx, y - sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::MoveRight));
        assert_eq!(command_for_key("ArrowUp"), Some(Command::Jump));
        assert_eq!(command_for_key("ArrowDown"), Some(Command::Slide));
        assert_eq!(command_for_key("Escape"), None);
    }

    #[test]
    fn test_swipe_directions() {
        assert_eq!(classify_swipe(80.0, 10.0), Some(Command::MoveRight));
        assert_eq!(classify_swipe(-80.0, 10.0), Some(Command::MoveLeft));
        assert_eq!(classify_swipe(5.0, -90.0), Some(Command::Jump));
        assert_eq!(classify_swipe(5.0, 90.0), Some(Command::Slide));
    }

    #[test]
    fn test_short_swipe_ignored() {
        assert_eq!(classify_swipe(30.0, 0.0), None);
        assert_eq!(classify_swipe(0.0, -50.0), None);
        assert_eq!(classify_swipe(0.0, 0.0), None);
    }

    #[test]
    fn test_tracker_needs_start() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(200.0, 0.0), None);
        tracker.begin(100.0, 300.0);
        assert_eq!(tracker.end(100.0, 200.0), Some(Command::Jump));
        // Consumed
        assert_eq!(tracker.end(100.0, 100.0), None);
    }
}
