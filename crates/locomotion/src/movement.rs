//! Speed, stamina and slope rules for the physical integrator.

use crate::config::LocomotionConfig;
use crate::state::PoseState;

/// Ramp the sprint speed, drain or regenerate stamina, and return the speed
/// the character moves at this frame.
pub fn resolve_move_speed(pose: &mut PoseState, config: &LocomotionConfig, delta: f32) -> f32 {
    if pose.is_sprinting {
        pose.current_sprint_speed =
            (pose.current_sprint_speed + config.sprint_acceleration * delta).min(config.sprint_speed);
        pose.stamina = (pose.stamina - config.stamina_drain * delta).max(0.0);
        return pose.current_sprint_speed;
    }

    pose.current_sprint_speed =
        (pose.current_sprint_speed - config.sprint_deceleration * delta).max(config.walk_speed);
    if pose.is_crouching {
        config.crouch_speed
    } else {
        pose.stamina = (pose.stamina + config.stamina_regen * delta).min(1.0);
        pose.current_sprint_speed
    }
}

/// Sprinting needs stamina, a direction and an upright stance.
pub fn can_sprint(pose: &PoseState) -> bool {
    pose.stamina > 0.0 && !pose.is_crouching && pose.has_intent() && !pose.movement_suppressed
}

/// Verdict of comparing ground height under the character with the ground a
/// short probe ahead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlopeCheck {
    /// Flat enough that nothing changes.
    Level,
    /// Walkable; the vertical position should move by this much.
    Absorb(f32),
    /// Too steep uphill.
    TooSteep,
    /// A single step taller than the character can climb.
    StepTooHigh,
}

impl SlopeCheck {
    pub fn evaluate(height_here: f32, height_ahead: f32, config: &LocomotionConfig) -> Self {
        let rise = height_ahead - height_here;
        let slope = rise.abs() / config.slope_probe_distance;
        if rise > 0.0 && slope > config.max_climbable_slope {
            SlopeCheck::TooSteep
        } else if rise > config.max_step_up {
            SlopeCheck::StepTooHigh
        } else if rise.abs() > config.step_absorb_threshold {
            SlopeCheck::Absorb(rise)
        } else {
            SlopeCheck::Level
        }
    }

    pub fn blocks(self) -> bool {
        matches!(self, SlopeCheck::TooSteep | SlopeCheck::StepTooHigh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::RigDimensions;
    use engine_core::Vec3;

    fn pose(config: &LocomotionConfig) -> PoseState {
        PoseState::standing_at(Vec3::ZERO, config.walk_speed, &RigDimensions::default())
    }

    #[test]
    fn sprint_speed_ramps_up_and_caps() {
        let config = LocomotionConfig::default();
        let mut pose = pose(&config);
        pose.is_sprinting = true;
        let speed = resolve_move_speed(&mut pose, &config, 0.1);
        assert!((speed - 1.7).abs() < 1e-5);
        for _ in 0..100 {
            resolve_move_speed(&mut pose, &config, 0.1);
        }
        assert_eq!(pose.current_sprint_speed, config.sprint_speed);
    }

    #[test]
    fn sprint_speed_decays_but_never_below_walk() {
        let config = LocomotionConfig::default();
        let mut pose = pose(&config);
        pose.current_sprint_speed = 6.0;
        let speed = resolve_move_speed(&mut pose, &config, 0.1);
        assert!((speed - 5.5).abs() < 1e-5);
        for _ in 0..100 {
            resolve_move_speed(&mut pose, &config, 0.1);
        }
        assert_eq!(pose.current_sprint_speed, config.walk_speed);
    }

    #[test]
    fn crouching_overrides_speed_and_pauses_regen() {
        let config = LocomotionConfig::default();
        let mut pose = pose(&config);
        pose.is_crouching = true;
        pose.stamina = 0.5;
        let speed = resolve_move_speed(&mut pose, &config, 0.1);
        assert_eq!(speed, config.crouch_speed);
        assert_eq!(pose.stamina, 0.5);
    }

    #[test]
    fn stamina_drains_while_sprinting_and_regens_while_walking() {
        let config = LocomotionConfig::default();
        let mut pose = pose(&config);
        pose.is_sprinting = true;
        resolve_move_speed(&mut pose, &config, 0.1);
        assert!((pose.stamina - 0.98).abs() < 1e-5);

        pose.is_sprinting = false;
        resolve_move_speed(&mut pose, &config, 0.1);
        assert!((pose.stamina - 1.0).abs() < 1e-5);

        pose.stamina = 0.01;
        pose.is_sprinting = true;
        resolve_move_speed(&mut pose, &config, 0.1);
        assert_eq!(pose.stamina, 0.0);
    }

    #[test]
    fn sprint_preconditions() {
        let config = LocomotionConfig::default();
        let mut pose = pose(&config);
        assert!(!can_sprint(&pose), "no intent");
        pose.move_intent = Vec3::NEG_Z;
        assert!(can_sprint(&pose));
        pose.is_crouching = true;
        assert!(!can_sprint(&pose));
        pose.is_crouching = false;
        pose.stamina = 0.0;
        assert!(!can_sprint(&pose));
    }

    #[test]
    fn slope_verdicts() {
        let config = LocomotionConfig::default();
        assert_eq!(SlopeCheck::evaluate(0.0, 0.005, &config), SlopeCheck::Level);
        match SlopeCheck::evaluate(0.0, 0.03, &config) {
            SlopeCheck::Absorb(rise) => assert!((rise - 0.03).abs() < 1e-6),
            other => panic!("expected absorb, got {:?}", other),
        }
        // 0.06 over 0.1 m is a 60% grade.
        assert_eq!(SlopeCheck::evaluate(0.0, 0.06, &config), SlopeCheck::TooSteep);
        assert!(SlopeCheck::evaluate(0.0, 0.06, &config).blocks());
        // Any descent is walkable.
        assert_eq!(SlopeCheck::evaluate(1.0, 0.5, &config), SlopeCheck::Absorb(-0.5));
    }

    #[test]
    fn tall_step_blocks_even_when_slope_is_allowed() {
        let config = LocomotionConfig {
            max_climbable_slope: 100.0,
            ..LocomotionConfig::default()
        };
        assert_eq!(SlopeCheck::evaluate(0.0, 0.4, &config), SlopeCheck::StepTooHigh);
        assert!(!SlopeCheck::evaluate(0.0, 0.2, &config).blocks());
    }
}
