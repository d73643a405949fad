//! Tuning values for the controller. Every field has a default so partial
//! `config.ron` sections are accepted.

use crate::rig::RigDimensions;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};
use thiserror::Error;

/// Rejected tuning values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("gravity must point down, got {0}")]
    UpwardGravity(f32),
    #[error("torso turn threshold must lie in (0, π], got {0}")]
    TurnThreshold(f32),
    #[error("frame delta range is inverted: min {min} > max {max}")]
    DeltaRange { min: f32, max: f32 },
    #[error("sprint speed {sprint} is below walk speed {walk}")]
    SprintBelowWalk { walk: f32, sprint: f32 },
}

/// Walk-cycle amplitudes. Angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    /// Phase advance per metre travelled.
    pub walk_frequency: f32,
    pub thigh_amplitude: f32,
    /// Extra knee flexion while the leg swings forward.
    pub knee_amplitude: f32,
    pub arm_amplitude: f32,
    /// Elbow bend at the back of the arm swing.
    pub elbow_back: f32,
    /// Elbow bend at the front of the arm swing.
    pub elbow_forward: f32,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            walk_frequency: 4.0,
            thigh_amplitude: FRAC_PI_6,
            knee_amplitude: FRAC_PI_4,
            arm_amplitude: FRAC_PI_6,
            elbow_back: 70f32.to_radians(),
            elbow_forward: 20f32.to_radians(),
        }
    }
}

/// Everything the controller needs to know about how a character moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // Speeds (m/s) and sprint ramp (m/s²)
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    pub sprint_acceleration: f32,
    pub sprint_deceleration: f32,

    // Stamina, as fraction per second
    pub stamina_drain: f32,
    pub stamina_regen: f32,

    // Jumping
    pub jump_height: f32,
    pub gravity: f32,

    // Torso / leg decoupling
    pub torso_turn_threshold: f32,
    /// Shared angular rate for torso and legs (rad/s).
    pub torso_turn_speed: f32,

    // Lean and crouch blending
    pub lean_speed: f32,
    pub max_lean: f32,
    /// Upper-body roll at full lean.
    pub max_lean_angle: f32,
    pub crouch_forward_lean_speed: f32,
    pub max_crouch_forward_lean: f32,
    pub leg_bend_speed: f32,
    pub max_leg_bend: f32,

    pub gait: GaitConfig,

    // Terrain following
    /// How far ahead the slope probe samples the ground.
    pub slope_probe_distance: f32,
    /// Rise over run above which an uphill step is refused.
    pub max_climbable_slope: f32,
    pub max_step_up: f32,
    /// Height changes smaller than this are not absorbed.
    pub step_absorb_threshold: f32,

    // Frame delta clamp (seconds)
    pub min_delta: f32,
    pub max_delta: f32,

    /// Radians of look rotation per pixel of mouse motion.
    pub look_sensitivity: f32,

    pub rig: RigDimensions,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.4,
            sprint_speed: 10.0,
            crouch_speed: 1.0,
            sprint_acceleration: 3.0,
            sprint_deceleration: 5.0,
            stamina_drain: 0.2,
            stamina_regen: 0.2,
            jump_height: 2.0,
            gravity: -9.81,
            torso_turn_threshold: FRAC_PI_2,
            torso_turn_speed: 3.0,
            lean_speed: 1.0,
            max_lean: 1.0,
            max_lean_angle: FRAC_PI_6,
            crouch_forward_lean_speed: 3.0,
            max_crouch_forward_lean: PI / 12.0,
            leg_bend_speed: 5.0,
            max_leg_bend: FRAC_PI_3,
            gait: GaitConfig::default(),
            slope_probe_distance: 0.1,
            max_climbable_slope: 0.5,
            max_step_up: 0.3,
            step_absorb_threshold: 0.01,
            min_delta: 0.01,
            max_delta: 0.1,
            look_sensitivity: 0.002,
            rig: RigDimensions::default(),
        }
    }
}

impl LocomotionConfig {
    /// Initial upward velocity that peaks at `jump_height`.
    pub fn jump_strength(&self) -> f32 {
        (2.0 * self.gravity.abs() * self.jump_height).sqrt()
    }

    /// Clamp a raw frame delta into the stable range.
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        // max/min rather than clamp: NaN falls through to min_delta.
        delta.max(self.min_delta).min(self.max_delta)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("sprint_acceleration", self.sprint_acceleration),
            ("sprint_deceleration", self.sprint_deceleration),
            ("torso_turn_speed", self.torso_turn_speed),
            ("lean_speed", self.lean_speed),
            ("max_lean", self.max_lean),
            ("crouch_forward_lean_speed", self.crouch_forward_lean_speed),
            ("leg_bend_speed", self.leg_bend_speed),
            ("walk_frequency", self.gait.walk_frequency),
            ("slope_probe_distance", self.slope_probe_distance),
            ("min_delta", self.min_delta),
            ("look_sensitivity", self.look_sensitivity),
            ("standing_eye_height", self.rig.standing_eye_height),
            ("standing_hip_height", self.rig.standing_hip_height),
            ("leg_segment_length", self.rig.leg_segment_length),
            ("upper_arm_length", self.rig.upper_arm_length),
            ("lower_arm_length", self.rig.lower_arm_length),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("stamina_drain", self.stamina_drain),
            ("stamina_regen", self.stamina_regen),
            ("jump_height", self.jump_height),
            ("max_climbable_slope", self.max_climbable_slope),
            ("max_step_up", self.max_step_up),
            ("step_absorb_threshold", self.step_absorb_threshold),
            ("max_crouch_forward_lean", self.max_crouch_forward_lean),
            ("max_leg_bend", self.max_leg_bend),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !(self.gravity < 0.0) {
            return Err(ConfigError::UpwardGravity(self.gravity));
        }
        if !(self.torso_turn_threshold > 0.0 && self.torso_turn_threshold <= PI) {
            return Err(ConfigError::TurnThreshold(self.torso_turn_threshold));
        }
        if self.min_delta > self.max_delta {
            return Err(ConfigError::DeltaRange {
                min: self.min_delta,
                max: self.max_delta,
            });
        }
        if self.sprint_speed < self.walk_speed {
            return Err(ConfigError::SprintBelowWalk {
                walk: self.walk_speed,
                sprint: self.sprint_speed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LocomotionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn jump_strength_reaches_requested_height() {
        let config = LocomotionConfig::default();
        let v = config.jump_strength();
        // v² / 2g
        let apex = v * v / (2.0 * 9.81);
        assert!((apex - 2.0).abs() < 1e-4);
    }

    #[test]
    fn delta_is_clamped_to_stable_range() {
        let config = LocomotionConfig::default();
        assert_eq!(config.clamp_delta(0.0), 0.01);
        assert_eq!(config.clamp_delta(-3.0), 0.01);
        assert_eq!(config.clamp_delta(0.016), 0.016);
        assert_eq!(config.clamp_delta(2.5), 0.1);
        assert_eq!(config.clamp_delta(f32::NAN), 0.01);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = LocomotionConfig::default();
        config.walk_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "walk_speed", .. })
        ));

        let mut config = LocomotionConfig::default();
        config.gravity = 9.81;
        assert_eq!(config.validate(), Err(ConfigError::UpwardGravity(9.81)));

        let mut config = LocomotionConfig::default();
        config.torso_turn_threshold = 4.0;
        assert_eq!(config.validate(), Err(ConfigError::TurnThreshold(4.0)));

        let mut config = LocomotionConfig::default();
        config.min_delta = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::DeltaRange { .. })));

        let mut config = LocomotionConfig::default();
        config.sprint_speed = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::SprintBelowWalk { .. })));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::NonPositive {
            field: "crouch_speed",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "`crouch_speed` must be positive, got -1");
    }
}
