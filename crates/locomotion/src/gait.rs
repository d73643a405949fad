//! Walk-cycle joint synthesis.
//!
//! The cycle is speed-synced: phase advances with distance covered rather
//! than time, so a sprint swings the limbs faster than a walk. Joint angles
//! are absolute segment angles about the body's X axis, positive swinging
//! the segment forward.

use crate::config::GaitConfig;
use crate::rig::Side;
use std::f32::consts::PI;

/// Phase accumulator for the walk cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WalkCycle {
    pub phase: f32,
}

impl WalkCycle {
    /// Advance while walking; snap back to the idle pose otherwise.
    pub fn advance(&mut self, delta: f32, move_speed: f32, frequency: f32, walking: bool) {
        if walking {
            self.phase += delta * move_speed * frequency;
        } else {
            self.phase = 0.0;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegAngles {
    pub thigh: f32,
    /// Lower-leg angle. Never positive: knees do not bend backward.
    pub knee: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmAngles {
    pub upper_arm: f32,
    /// Lower-arm angle. Never negative.
    pub elbow: f32,
}

/// Joint angles for all four limbs, recomputed every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LimbAngles {
    pub left_leg: LegAngles,
    pub right_leg: LegAngles,
    pub left_arm: ArmAngles,
    pub right_arm: ArmAngles,
}

impl LimbAngles {
    /// Pose the limbs for a walk phase on top of the crouch knee bend.
    pub fn synthesize(phase: f32, leg_bend: f32, gait: &GaitConfig) -> Self {
        let sin_left = phase.sin();
        let sin_right = (phase + PI).sin();

        Self {
            left_leg: leg(sin_left, leg_bend, gait),
            right_leg: leg(sin_right, leg_bend, gait),
            // Each arm swings with the opposite leg.
            left_arm: arm(sin_right, gait),
            right_arm: arm(sin_left, gait),
        }
    }

    pub fn leg(&self, side: Side) -> LegAngles {
        match side {
            Side::Left => self.left_leg,
            Side::Right => self.right_leg,
        }
    }

    pub fn arm(&self, side: Side) -> ArmAngles {
        match side {
            Side::Left => self.left_arm,
            Side::Right => self.right_arm,
        }
    }
}

fn leg(swing: f32, bend: f32, gait: &GaitConfig) -> LegAngles {
    let thigh = bend + swing * gait.thigh_amplitude;
    // Extra flexion only on the lifting half of the cycle.
    let lift = (-swing).max(0.0) * gait.knee_amplitude;
    LegAngles {
        thigh,
        knee: (-thigh - lift).min(0.0),
    }
}

fn arm(opposite_swing: f32, gait: &GaitConfig) -> ArmAngles {
    let bend = opposite_swing.max(0.0) * gait.elbow_back
        + (-opposite_swing).max(0.0) * gait.elbow_forward;
    ArmAngles {
        upper_arm: -opposite_swing * gait.arm_amplitude,
        elbow: bend.max(0.0),
    }
}
