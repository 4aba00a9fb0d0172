//! Path stepping.

use bastion_core::components::PathFollower;
use bastion_core::constants::WAYPOINT_EPSILON;
use glam::DVec3;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Still on the path at the new position.
    Moving(DVec3),
    /// No vertices remain; the enemy is at the exit.
    ReachedExit(DVec3),
}

/// Advance `position` toward the follower's next vertex by at most
/// `speed * dt`, moving on to the following vertex once within
/// [`WAYPOINT_EPSILON`]. Never overshoots a vertex.
pub fn step_along_path(
    position: DVec3,
    follower: &mut PathFollower,
    speed: f64,
    dt: f64,
) -> StepOutcome {
    let Some(target) = follower.target() else {
        return StepOutcome::ReachedExit(position);
    };

    let new_position = move_towards(position, target, speed.max(0.0) * dt);

    if new_position.distance(target) < WAYPOINT_EPSILON {
        follower.next_vertex += 1;
        if follower.is_finished() {
            return StepOutcome::ReachedExit(new_position);
        }
    }
    StepOutcome::Moving(new_position)
}

/// Move from `from` toward `to` by at most `max_distance`.
pub fn move_towards(from: DVec3, to: DVec3, max_distance: f64) -> DVec3 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_distance || distance == 0.0 {
        to
    } else {
        from + delta / distance * max_distance
    }
}
