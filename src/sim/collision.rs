//! Collision queries between the runner and the obstacle field
//!
//! Everything on the field is an axis-aligned box, so the whole collision
//! story is a strict-overlap AABB test walked across the obstacle sequence
//! in order. Edge contact does not count as a hit.

use super::rect::Rect;
use super::state::Obstacle;

/// Index of the first obstacle whose box strictly overlaps the runner's,
/// walking the sequence oldest/leftmost first and stopping at the first hit
pub fn first_hit(runner: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| runner.overlaps(&o.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Runner;

    #[test]
    fn test_grounded_runner_hits_obstacle_in_lane() {
        let runner = Runner::new();
        let obstacles = [Obstacle::new(RUNNER_X + 10.0, 40.0)];
        assert_eq!(first_hit(&runner.rect(), &obstacles), Some(0));
    }

    #[test]
    fn test_distant_obstacle_misses() {
        let runner = Runner::new();
        let obstacles = [Obstacle::new(400.0, 40.0)];
        assert_eq!(first_hit(&runner.rect(), &obstacles), None);
    }

    #[test]
    fn test_edge_contact_is_not_a_hit() {
        let runner = Runner::new();
        // Right edge lands exactly on the runner's left edge at x=50
        let obstacles = [Obstacle::new(RUNNER_X - OBSTACLE_WIDTH, 40.0)];
        assert_eq!(first_hit(&runner.rect(), &obstacles), None);
        // A sliver past the edge and it counts
        let obstacles = [Obstacle::new(RUNNER_X - OBSTACLE_WIDTH + 0.5, 40.0)];
        assert_eq!(first_hit(&runner.rect(), &obstacles), Some(0));
    }

    #[test]
    fn test_first_of_several_overlaps_wins() {
        let runner = Runner::new();
        let obstacles = [
            Obstacle::new(RUNNER_X + 5.0, 40.0),
            Obstacle::new(RUNNER_X + 15.0, 40.0),
        ];
        assert_eq!(first_hit(&runner.rect(), &obstacles), Some(0));
    }

    #[test]
    fn test_airborne_runner_clears_tall_obstacle() {
        let mut runner = Runner::new();
        // High enough that the runner's bottom sits above a 50-unit
        // obstacle whose top is at y=200
        runner.y = 100.0;
        let obstacles = [Obstacle::new(RUNNER_X, OBSTACLE_MAX_HEIGHT)];
        assert_eq!(first_hit(&runner.rect(), &obstacles), None);
    }
}
