//! Per-character simulation state.

use crate::gait::{LimbAngles, WalkCycle};
use crate::rig::RigDimensions;
use engine_core::{approach, Vec3};

/// Detects press and release transitions of a level-triggered input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    held: bool,
}

/// Result of feeding one frame's level into an [`EdgeTrigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
    Steady,
}

impl EdgeTrigger {
    pub fn update(&mut self, held: bool) -> Edge {
        let edge = match (self.held, held) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Steady,
        };
        self.held = held;
        edge
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// A scalar that chases its target at a bounded rate, landing on it exactly
/// once within one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Damper {
    pub value: f32,
    pub target: f32,
}

impl Damper {
    pub fn step(&mut self, rate: f32, delta: f32) {
        self.value = approach(self.value, self.target, rate * delta);
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}

/// Body heights derived from the knee bend. Crouching lowers the eye only
/// through these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyHeights {
    pub hip_height: f32,
    /// How far the hips have dropped from standing.
    pub reduction: f32,
    /// Feet-to-eye distance.
    pub eye_height: f32,
    pub head_offset: f32,
}

impl BodyHeights {
    pub fn from_leg_bend(leg_bend: f32, dims: &RigDimensions) -> Self {
        let hip_height = dims.standing_hip_height * leg_bend.cos();
        let reduction = dims.standing_hip_height - hip_height;
        Self {
            hip_height,
            reduction,
            eye_height: dims.standing_eye_height - reduction,
            head_offset: dims.standing_head_offset - reduction,
        }
    }

    pub fn standing(dims: &RigDimensions) -> Self {
        Self::from_leg_bend(0.0, dims)
    }
}

/// Everything the controller knows about one character between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseState {
    /// Eye anchor in world space. Feet sit `heights.eye_height` below it.
    pub position: Vec3,
    pub velocity: Vec3,
    /// Local-space move direction (forward = -Z), unit length or zero.
    pub move_intent: Vec3,

    pub grounded: bool,
    pub is_jumping: bool,
    pub is_sprinting: bool,
    pub is_crouching: bool,
    pub movement_suppressed: bool,
    pub jump_key: EdgeTrigger,
    pub crouch_key: EdgeTrigger,

    /// Ramps between walk and sprint speed.
    pub current_sprint_speed: f32,
    /// Speed used by the last update.
    pub move_speed: f32,
    pub stamina: f32,

    /// Look yaw, driven from outside.
    pub yaw: f32,
    /// Look pitch, driven from outside.
    pub pitch: f32,
    pub torso_yaw: f32,
    pub leg_yaw: f32,

    /// Normalized sideways lean in [-1, 1].
    pub lean: Damper,
    pub crouch_forward_lean: Damper,
    pub leg_bend: Damper,

    pub walk: WalkCycle,
    pub limbs: LimbAngles,
    pub heights: BodyHeights,
}

impl PoseState {
    /// A standing character with its feet at `feet`.
    pub fn standing_at(feet: Vec3, walk_speed: f32, dims: &RigDimensions) -> Self {
        let heights = BodyHeights::standing(dims);
        Self {
            position: feet + Vec3::Y * heights.eye_height,
            velocity: Vec3::ZERO,
            move_intent: Vec3::ZERO,
            grounded: true,
            is_jumping: false,
            is_sprinting: false,
            is_crouching: false,
            movement_suppressed: false,
            jump_key: EdgeTrigger::default(),
            crouch_key: EdgeTrigger::default(),
            current_sprint_speed: walk_speed,
            move_speed: walk_speed,
            stamina: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            torso_yaw: 0.0,
            leg_yaw: 0.0,
            lean: Damper::default(),
            crouch_forward_lean: Damper::default(),
            leg_bend: Damper::default(),
            walk: WalkCycle::default(),
            limbs: LimbAngles::default(),
            heights,
        }
    }

    pub fn feet(&self) -> Vec3 {
        self.position - Vec3::Y * self.heights.eye_height
    }

    pub fn has_intent(&self) -> bool {
        self.move_intent.length_squared() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_trigger_reports_each_transition_once() {
        let mut trigger = EdgeTrigger::default();
        assert_eq!(trigger.update(true), Edge::Rising);
        assert_eq!(trigger.update(true), Edge::Steady);
        assert!(trigger.is_held());
        assert_eq!(trigger.update(false), Edge::Falling);
        assert_eq!(trigger.update(false), Edge::Steady);
    }

    #[test]
    fn damper_moves_at_bounded_rate_then_snaps() {
        let mut damper = Damper {
            value: 0.0,
            target: 1.0,
        };
        damper.step(1.0, 0.25);
        assert!((damper.value - 0.25).abs() < 1e-6);
        for _ in 0..3 {
            damper.step(1.0, 0.25);
        }
        assert!(damper.is_settled());
        damper.step(1.0, 0.25);
        assert_eq!(damper.value, 1.0);
    }

    #[test]
    fn crouch_bend_lowers_eye_through_hip_height() {
        let dims = RigDimensions::default();
        let standing = BodyHeights::standing(&dims);
        assert!((standing.eye_height - dims.standing_eye_height).abs() < 1e-6);
        assert_eq!(standing.reduction, 0.0);

        let crouched = BodyHeights::from_leg_bend(std::f32::consts::FRAC_PI_3, &dims);
        // cos(60°) = 0.5, so the hips drop by half their height.
        assert!((crouched.hip_height - 0.41).abs() < 1e-5);
        assert!((crouched.reduction - 0.41).abs() < 1e-5);
        assert!((crouched.eye_height - 1.39).abs() < 1e-5);
        assert!((crouched.head_offset - 1.24).abs() < 1e-5);
    }

    #[test]
    fn standing_pose_puts_feet_where_asked() {
        let dims = RigDimensions::default();
        let pose = PoseState::standing_at(Vec3::new(1.0, 2.0, 3.0), 1.4, &dims);
        assert!((pose.feet() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!((pose.position.y - 3.8).abs() < 1e-6);
        assert!(pose.grounded);
        assert_eq!(pose.stamina, 1.0);
        assert!(!pose.has_intent());
    }
}
