//! Held actions → movement intent.

use engine_core::{Quat, Vec3};
use input::{Action, ActionSource};

/// Local-space move direction from the four movement actions: forward is -Z,
/// right is +X. Unit length, or zero when nothing is held or opposite
/// actions cancel out.
pub fn move_intent(input: &impl ActionSource) -> Vec3 {
    let mut x = 0.0;
    let mut z = 0.0;
    if input.is_action_held(Action::MoveForward) {
        z -= 1.0;
    }
    if input.is_action_held(Action::MoveBackward) {
        z += 1.0;
    }
    if input.is_action_held(Action::StrafeLeft) {
        x -= 1.0;
    }
    if input.is_action_held(Action::StrafeRight) {
        x += 1.0;
    }
    Vec3::new(x, 0.0, z).normalize_or_zero()
}

/// Lean target in {-1, 0, +1}. Holding both lean actions cancels out.
pub fn lean_target(input: &impl ActionSource) -> f32 {
    let left = input.is_action_held(Action::LeanLeft);
    let right = input.is_action_held(Action::LeanRight);
    match (left, right) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Rotate a local intent into world space by the look yaw.
pub fn world_intent(intent: Vec3, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * intent
}

/// Whether the intent has a forward component, which makes the legs turn
/// straight to the torso.
pub fn is_forward(intent: Vec3) -> bool {
    intent.z < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn held(actions: &[Action]) -> HashSet<Action> {
        actions.iter().copied().collect()
    }

    #[test]
    fn single_keys_map_to_axes() {
        assert_eq!(move_intent(&held(&[Action::MoveForward])), Vec3::NEG_Z);
        assert_eq!(move_intent(&held(&[Action::MoveBackward])), Vec3::Z);
        assert_eq!(move_intent(&held(&[Action::StrafeLeft])), Vec3::NEG_X);
        assert_eq!(move_intent(&held(&[Action::StrafeRight])), Vec3::X);
    }

    #[test]
    fn diagonal_is_normalized() {
        let intent = move_intent(&held(&[Action::MoveForward, Action::StrafeRight]));
        assert!((intent.length() - 1.0).abs() < 1e-6);
        assert!(intent.x > 0.0 && intent.z < 0.0);
    }

    #[test]
    fn opposing_keys_cancel_to_zero() {
        assert_eq!(
            move_intent(&held(&[Action::MoveForward, Action::MoveBackward])),
            Vec3::ZERO
        );
        assert_eq!(
            move_intent(&held(&[
                Action::MoveForward,
                Action::MoveBackward,
                Action::StrafeLeft,
                Action::StrafeRight
            ])),
            Vec3::ZERO
        );
        assert_eq!(move_intent(&held(&[])), Vec3::ZERO);
    }

    #[test]
    fn lean_keys_resolve_to_unit_targets() {
        assert_eq!(lean_target(&held(&[Action::LeanLeft])), 1.0);
        assert_eq!(lean_target(&held(&[Action::LeanRight])), -1.0);
        assert_eq!(lean_target(&held(&[Action::LeanLeft, Action::LeanRight])), 0.0);
        assert_eq!(lean_target(&held(&[])), 0.0);
    }

    #[test]
    fn forward_intent_follows_look_yaw() {
        // A quarter turn left points forward along -X.
        let world = world_intent(Vec3::NEG_Z, std::f32::consts::FRAC_PI_2);
        assert!((world - Vec3::NEG_X).length() < 1e-6);
        assert!(is_forward(Vec3::NEG_Z));
        assert!(!is_forward(Vec3::X));
    }
}
