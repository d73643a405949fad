//! Torso / leg yaw decoupling.
//!
//! The torso chases the look direction at a bounded rate. The legs hold
//! still until the torso has twisted past the threshold, then turn just far
//! enough to bring the twist back to the threshold. Moving forward turns the
//! legs all the way to the torso instead. Both angles are stored wrapped to
//! (-π, π], and every comparison goes through the shortest arc.

use engine_core::{approach_angle, shortest_angle};

/// Step the torso toward the look yaw by at most `max_step`.
pub fn chase_torso_yaw(torso_yaw: f32, look_yaw: f32, max_step: f32) -> f32 {
    approach_angle(torso_yaw, look_yaw, max_step)
}

/// Where the legs want to point given the current torso twist.
pub fn leg_yaw_target(torso_yaw: f32, leg_yaw: f32, threshold: f32, forward_intent: bool) -> f32 {
    if forward_intent {
        return torso_yaw;
    }
    let twist = shortest_angle(torso_yaw, leg_yaw);
    if twist > threshold {
        torso_yaw - threshold
    } else if twist < -threshold {
        torso_yaw + threshold
    } else {
        leg_yaw
    }
}

/// Advance the leg yaw one frame.
pub fn resolve_leg_yaw(
    torso_yaw: f32,
    leg_yaw: f32,
    threshold: f32,
    max_step: f32,
    forward_intent: bool,
) -> f32 {
    let target = leg_yaw_target(torso_yaw, leg_yaw, threshold, forward_intent);
    approach_angle(leg_yaw, target, max_step)
}

/// Twist of the upper body relative to the legs, as applied to the rig.
pub fn torso_twist(torso_yaw: f32, leg_yaw: f32, threshold: f32) -> f32 {
    shortest_angle(torso_yaw, leg_yaw).clamp(-threshold, threshold)
}
