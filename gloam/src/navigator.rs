//! Waypoint-queue movement for path-following entities.

use std::collections::VecDeque;

use murk_core::{Point, Vec2};

/// Distance (in tile units) at which a waypoint counts as reached.
pub const WAYPOINT_EPSILON: f32 = 0.01;

/// Consumes a planned path one waypoint at a time, advancing a continuous
/// position toward the front waypoint's tile center at a fixed speed.
///
/// Reaching a waypoint snaps the position exactly onto the tile center so
/// float error never accumulates across a long path; the next waypoint is
/// pursued on the following tick. With an empty queue the navigator is
/// idle until [`follow`](Self::follow) supplies a new path.
#[derive(Debug, Clone)]
pub struct Navigator {
    /// Movement speed in tiles per second.
    pub speed: f32,
    queue: VecDeque<Point>,
}

impl Navigator {
    /// Create an idle navigator.
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            queue: VecDeque::new(),
        }
    }

    /// Replace the movement queue wholesale with a new path.
    pub fn follow(&mut self, path: Vec<Point>) {
        self.queue = path.into();
    }

    /// Drop any remaining waypoints.
    pub fn stop(&mut self) {
        self.queue.clear();
    }

    /// Whether there is no waypoint left to pursue.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remaining waypoints, front first.
    pub fn remaining(&self) -> impl Iterator<Item = &Point> {
        self.queue.iter()
    }

    /// Advance `pos` toward the current waypoint by `speed * dt`.
    ///
    /// If the step reaches (or overshoots) the waypoint, the position snaps
    /// to the exact tile center and the waypoint is popped.
    pub fn advance(&mut self, pos: &mut Vec2, dt: f32) {
        let Some(&target) = self.queue.front() else {
            return;
        };
        let goal = Vec2::from(target);
        let remaining = pos.distance(goal);
        let step = self.speed * dt;

        if remaining <= WAYPOINT_EPSILON || step >= remaining {
            *pos = goal;
            self.queue.pop_front();
            return;
        }

        let dir = goal - *pos;
        *pos += dir * (step / remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_toward_waypoint_at_speed() {
        let mut nav = Navigator::new(2.0);
        nav.follow(vec![Point::new(5, 1)]);
        let mut pos = Vec2::new(1.0, 1.0);
        nav.advance(&mut pos, 0.5);
        assert!((pos.x - 2.0).abs() < 1e-6);
        assert!((pos.y - 1.0).abs() < 1e-6);
        assert!(!nav.is_idle());
    }

    #[test]
    fn overshoot_snaps_to_tile_center() {
        let mut nav = Navigator::new(10.0);
        nav.follow(vec![Point::new(2, 2)]);
        let mut pos = Vec2::new(1.99, 1.99);
        // One tick at this speed overshoots by far.
        nav.advance(&mut pos, 0.5);
        assert_eq!(pos, Vec2::new(2.0, 2.0));
        assert!(nav.is_idle());
    }

    #[test]
    fn epsilon_close_counts_as_reached() {
        let mut nav = Navigator::new(0.0001);
        nav.follow(vec![Point::new(3, 4)]);
        let mut pos = Vec2::new(3.0, 4.005);
        nav.advance(&mut pos, 0.016);
        assert_eq!(pos, Vec2::new(3.0, 4.0));
        assert!(nav.is_idle());
    }

    #[test]
    fn consumes_waypoints_in_order() {
        let mut nav = Navigator::new(1.0);
        nav.follow(vec![Point::new(1, 2), Point::new(2, 2)]);
        let mut pos = Vec2::new(1.0, 1.0);
        // Exactly one tile per second; each waypoint takes one tick of 1s.
        nav.advance(&mut pos, 1.0);
        assert_eq!(pos, Vec2::new(1.0, 2.0));
        nav.advance(&mut pos, 1.0);
        assert_eq!(pos, Vec2::new(2.0, 2.0));
        assert!(nav.is_idle());
    }

    #[test]
    fn follow_replaces_the_queue() {
        let mut nav = Navigator::new(1.0);
        nav.follow(vec![Point::new(9, 9), Point::new(8, 9)]);
        nav.follow(vec![Point::new(1, 2)]);
        assert_eq!(nav.remaining().collect::<Vec<_>>(), vec![&Point::new(1, 2)]);
    }

    #[test]
    fn idle_navigator_holds_position() {
        let mut nav = Navigator::new(5.0);
        let mut pos = Vec2::new(4.5, 4.5);
        nav.advance(&mut pos, 1.0);
        assert_eq!(pos, Vec2::new(4.5, 4.5));
    }
}
