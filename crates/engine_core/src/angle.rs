//! Angle helpers. Every yaw comparison in the engine goes through these so that
//! differences across the ±π seam take the short way round.

use std::f32::consts::{PI, TAU};

/// Wrap an angle into the half-open range (-π, π].
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Signed shortest rotation that takes `from` onto `to`, in (-π, π].
#[inline]
pub fn shortest_angle(to: f32, from: f32) -> f32 {
    wrap_angle(to - from)
}

/// Move `current` toward `target` by at most `max_step`, landing exactly on
/// the target once it is within one step.
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = target - current;
    if diff.abs() > max_step {
        current + diff.signum() * max_step
    } else {
        target
    }
}

/// Angular version of [`approach`]: rotates along the shortest arc and returns
/// a wrapped angle.
#[inline]
pub fn approach_angle(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = shortest_angle(target, current);
    if diff.abs() > max_step {
        wrap_angle(current + diff.signum() * max_step)
    } else {
        wrap_angle(target)
    }
}
