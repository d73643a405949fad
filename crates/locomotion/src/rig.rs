//! Rig projection: pose state → per-part transforms for any number of rigs.
//!
//! [`project_pose`] does the forward kinematics once per frame into a
//! [`PoseFrame`] of parent-relative transforms. A [`RigAnchor`] then roots that
//! frame in the world, either following the character or standing still as
//! a mirrored reference. [`RigDescriptor`] maps each [`LimbRole`] to whatever
//! handle the host uses for rig parts, built once per rig.

use crate::config::LocomotionConfig;
use crate::state::PoseState;
use crate::yaw::torso_twist;
use engine_core::{EulerRot, Quat, Transform, TransformRaw, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Body side. Left is -X in rig space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Every posable part of a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbRole {
    Hips,
    UpperBody,
    HeadPivot,
    LeftUpperLeg,
    LeftKnee,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightKnee,
    RightLowerLeg,
    RightFoot,
    LeftUpperArm,
    LeftElbow,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightElbow,
    RightLowerArm,
    RightHand,
}

impl LimbRole {
    pub const COUNT: usize = 19;

    /// All roles in index order. Parents come before their children.
    pub const ALL: [LimbRole; LimbRole::COUNT] = [
        LimbRole::Hips,
        LimbRole::UpperBody,
        LimbRole::HeadPivot,
        LimbRole::LeftUpperLeg,
        LimbRole::LeftKnee,
        LimbRole::LeftLowerLeg,
        LimbRole::LeftFoot,
        LimbRole::RightUpperLeg,
        LimbRole::RightKnee,
        LimbRole::RightLowerLeg,
        LimbRole::RightFoot,
        LimbRole::LeftUpperArm,
        LimbRole::LeftElbow,
        LimbRole::LeftLowerArm,
        LimbRole::LeftHand,
        LimbRole::RightUpperArm,
        LimbRole::RightElbow,
        LimbRole::RightLowerArm,
        LimbRole::RightHand,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Arms and head hang off the upper body; everything else off the rig root.
    pub fn parent(self) -> Option<LimbRole> {
        match self {
            LimbRole::HeadPivot
            | LimbRole::LeftUpperArm
            | LimbRole::LeftElbow
            | LimbRole::LeftLowerArm
            | LimbRole::LeftHand
            | LimbRole::RightUpperArm
            | LimbRole::RightElbow
            | LimbRole::RightLowerArm
            | LimbRole::RightHand => Some(LimbRole::UpperBody),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LimbRole::Hips => "hips",
            LimbRole::UpperBody => "upper_body",
            LimbRole::HeadPivot => "head_pivot",
            LimbRole::LeftUpperLeg => "left_upper_leg",
            LimbRole::LeftKnee => "left_knee",
            LimbRole::LeftLowerLeg => "left_lower_leg",
            LimbRole::LeftFoot => "left_foot",
            LimbRole::RightUpperLeg => "right_upper_leg",
            LimbRole::RightKnee => "right_knee",
            LimbRole::RightLowerLeg => "right_lower_leg",
            LimbRole::RightFoot => "right_foot",
            LimbRole::LeftUpperArm => "left_upper_arm",
            LimbRole::LeftElbow => "left_elbow",
            LimbRole::LeftLowerArm => "left_lower_arm",
            LimbRole::LeftHand => "left_hand",
            LimbRole::RightUpperArm => "right_upper_arm",
            LimbRole::RightElbow => "right_elbow",
            LimbRole::RightLowerArm => "right_lower_arm",
            LimbRole::RightHand => "right_hand",
        }
    }

    pub fn upper_leg(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftUpperLeg,
            Side::Right => LimbRole::RightUpperLeg,
        }
    }

    pub fn knee(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftKnee,
            Side::Right => LimbRole::RightKnee,
        }
    }

    pub fn lower_leg(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftLowerLeg,
            Side::Right => LimbRole::RightLowerLeg,
        }
    }

    pub fn foot(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftFoot,
            Side::Right => LimbRole::RightFoot,
        }
    }

    pub fn upper_arm(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftUpperArm,
            Side::Right => LimbRole::RightUpperArm,
        }
    }

    pub fn elbow(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftElbow,
            Side::Right => LimbRole::RightElbow,
        }
    }

    pub fn lower_arm(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftLowerArm,
            Side::Right => LimbRole::RightLowerArm,
        }
    }

    pub fn hand(side: Side) -> Self {
        match side {
            Side::Left => LimbRole::LeftHand,
            Side::Right => LimbRole::RightHand,
        }
    }
}

/// Rig geometry in metres. Symmetric left/right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigDimensions {
    /// Feet-to-eye height when standing.
    pub standing_eye_height: f32,
    pub standing_head_offset: f32,
    pub standing_hip_height: f32,
    /// Thigh and shin length.
    pub leg_segment_length: f32,
    pub upper_arm_length: f32,
    pub lower_arm_length: f32,
    /// Shoulder joints, above the upper-body hinge.
    pub shoulder_height: f32,
    pub shoulder_offset: f32,
    /// Hip joints, either side of the centre line.
    pub hip_offset: f32,
    /// Foot lift above the shin end, so the sole rests on the ground.
    pub foot_lift: f32,
    /// Foot shift backward so its heel lines up with the shin.
    pub foot_setback: f32,
    /// Neck hinge above the upper-body hinge.
    pub head_pivot_height: f32,
    /// Head centre above the neck hinge.
    pub head_height: f32,
    /// Eye in front of the head centre.
    pub eye_forward: f32,
}

impl Default for RigDimensions {
    fn default() -> Self {
        const HEIGHT_SCALE: f32 = 0.9683;
        Self {
            standing_eye_height: 1.8,
            standing_head_offset: 1.65,
            standing_hip_height: 0.82,
            leg_segment_length: 0.45,
            upper_arm_length: 0.25,
            lower_arm_length: 0.25,
            shoulder_height: 0.55,
            shoulder_offset: 0.32,
            hip_offset: 0.12,
            foot_lift: 0.09,
            foot_setback: 0.125,
            head_pivot_height: 0.775 * HEIGHT_SCALE,
            head_height: 0.264 * HEIGHT_SCALE,
            eye_forward: 0.22,
        }
    }
}

/// Two segments hanging from a joint, each at its own absolute angle.
struct SegmentChain {
    upper_center: Vec3,
    joint: Vec3,
    lower_center: Vec3,
    end: Vec3,
}

fn hang(angle: f32) -> Vec3 {
    Quat::from_rotation_x(angle) * Vec3::NEG_Y
}

fn chain(root: Vec3, upper_angle: f32, lower_angle: f32, upper_len: f32, lower_len: f32) -> SegmentChain {
    let upper_dir = hang(upper_angle);
    let lower_dir = hang(lower_angle);
    let joint = root + upper_dir * upper_len;
    SegmentChain {
        upper_center: root + upper_dir * (upper_len * 0.5),
        joint,
        lower_center: joint + lower_dir * (lower_len * 0.5),
        end: joint + lower_dir * lower_len,
    }
}

/// One frame's rig pose in parent-relative space, not yet placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    /// Feet position of the character the pose came from.
    pub feet: Vec3,
    pub leg_yaw: f32,
    parts: [Transform; LimbRole::COUNT],
    eye_local: Vec3,
}

/// Forward kinematics for every rig part from the current pose.
pub fn project_pose(pose: &PoseState, config: &LocomotionConfig) -> PoseFrame {
    let dims = &config.rig;
    let hip_height = pose.heights.hip_height;
    let mut parts = [Transform::default(); LimbRole::COUNT];

    parts[LimbRole::Hips.index()] = Transform::from_position(Vec3::Y * hip_height);

    let twist = torso_twist(pose.torso_yaw, pose.leg_yaw, config.torso_turn_threshold);
    parts[LimbRole::UpperBody.index()] = Transform::from_position_rotation(
        Vec3::Y * hip_height,
        Quat::from_euler(
            EulerRot::XYZ,
            -pose.crouch_forward_lean.value,
            twist,
            pose.lean.value * config.max_lean_angle,
        ),
    );

    parts[LimbRole::HeadPivot.index()] = Transform::from_position_rotation(
        Vec3::Y * dims.head_pivot_height,
        Quat::from_rotation_x(pose.pitch),
    );

    for side in Side::BOTH {
        let leg = pose.limbs.leg(side);
        let hip = Vec3::new(side.sign() * dims.hip_offset, hip_height, 0.0);
        let l = chain(hip, leg.thigh, leg.knee, dims.leg_segment_length, dims.leg_segment_length);
        parts[LimbRole::upper_leg(side).index()] =
            Transform::from_position_rotation(l.upper_center, Quat::from_rotation_x(leg.thigh));
        parts[LimbRole::knee(side).index()] = Transform::from_position(l.joint);
        parts[LimbRole::lower_leg(side).index()] =
            Transform::from_position_rotation(l.lower_center, Quat::from_rotation_x(leg.knee));
        parts[LimbRole::foot(side).index()] =
            Transform::from_position(l.end + Vec3::new(0.0, dims.foot_lift, -dims.foot_setback));

        let arm = pose.limbs.arm(side);
        let shoulder = Vec3::new(side.sign() * dims.shoulder_offset, dims.shoulder_height, 0.0);
        let a = chain(
            shoulder,
            arm.upper_arm,
            arm.elbow,
            dims.upper_arm_length,
            dims.lower_arm_length,
        );
        parts[LimbRole::upper_arm(side).index()] =
            Transform::from_position_rotation(a.upper_center, Quat::from_rotation_x(arm.upper_arm));
        parts[LimbRole::elbow(side).index()] = Transform::from_position(a.joint);
        parts[LimbRole::lower_arm(side).index()] =
            Transform::from_position_rotation(a.lower_center, Quat::from_rotation_x(arm.elbow));
        parts[LimbRole::hand(side).index()] = Transform::from_position(a.end);
    }

    PoseFrame {
        feet: pose.feet(),
        leg_yaw: pose.leg_yaw,
        parts,
        eye_local: Vec3::new(0.0, dims.head_height, -dims.eye_forward),
    }
}

/// Where a rig stands in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigAnchor {
    /// Feet on the character, facing along its legs.
    Follow,
    /// Fixed in x/z at `base`, only the vertical offset of the feet animates.
    /// Faces `facing_offset` radians away from the character's legs.
    Mirror { base: Vec3, facing_offset: f32 },
}

impl RigAnchor {
    /// A reference rig at `base` turned to face the character.
    pub fn mirror_at(base: Vec3) -> Self {
        RigAnchor::Mirror {
            base,
            facing_offset: PI,
        }
    }

    pub fn root(&self, frame: &PoseFrame) -> Transform {
        match *self {
            RigAnchor::Follow => {
                Transform::from_position_rotation(frame.feet, Quat::from_rotation_y(frame.leg_yaw))
            }
            RigAnchor::Mirror {
                base,
                facing_offset,
            } => Transform::from_position_rotation(
                Vec3::new(base.x, base.y + frame.feet.y, base.z),
                Quat::from_rotation_y(frame.leg_yaw + facing_offset),
            ),
        }
    }
}

impl PoseFrame {
    /// Parent-relative transform of a part.
    pub fn local(&self, role: LimbRole) -> &Transform {
        &self.parts[role.index()]
    }

    /// Root the frame in the world.
    pub fn place(&self, anchor: &RigAnchor) -> RigTransforms {
        let root = anchor.root(self);
        let mut world = [Transform::default(); LimbRole::COUNT];
        for role in LimbRole::ALL {
            let parent = match role.parent() {
                Some(parent) => world[parent.index()],
                None => root,
            };
            world[role.index()] = parent.mul_transform(&self.parts[role.index()]);
        }
        let eye = world[LimbRole::HeadPivot.index()]
            .mul_transform(&Transform::from_position(self.eye_local));
        RigTransforms {
            root,
            local: self.parts,
            world,
            eye,
        }
    }
}

/// A fully posed rig: root, local and world transforms of every part.
#[derive(Debug, Clone, PartialEq)]
pub struct RigTransforms {
    pub root: Transform,
    local: [Transform; LimbRole::COUNT],
    world: [Transform; LimbRole::COUNT],
    eye: Transform,
}

impl RigTransforms {
    /// Transform relative to the part's parent.
    pub fn get(&self, role: LimbRole) -> &Transform {
        &self.local[role.index()]
    }

    pub fn world(&self, role: LimbRole) -> &Transform {
        &self.world[role.index()]
    }

    /// World transform of the eye; a camera attached here follows every head
    /// movement.
    pub fn eye(&self) -> &Transform {
        &self.eye
    }

    /// World matrices in [`LimbRole::ALL`] order, ready for instance upload.
    pub fn to_raw(&self) -> Vec<TransformRaw> {
        self.world.iter().map(TransformRaw::from).collect()
    }
}

/// Role → host handle table for one rig, built once.
#[derive(Debug, Clone)]
pub struct RigDescriptor<H> {
    root: H,
    parts: [H; LimbRole::COUNT],
}

impl<H: Copy> RigDescriptor<H> {
    /// Create a handle for the root and for every role.
    pub fn build(root: H, mut make: impl FnMut(LimbRole) -> H) -> Self {
        Self {
            root,
            parts: LimbRole::ALL.map(&mut make),
        }
    }

    pub fn root(&self) -> H {
        self.root
    }

    pub fn handle(&self, role: LimbRole) -> H {
        self.parts[role.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LimbRole, H)> + '_ {
        LimbRole::ALL.iter().map(move |&role| (role, self.parts[role.index()]))
    }

    /// Write world transforms of the root and every part through `write`.
    pub fn apply(&self, rig: &RigTransforms, mut write: impl FnMut(H, &Transform)) {
        write(self.root, &rig.root);
        for role in LimbRole::ALL {
            write(self.parts[role.index()], rig.world(role));
        }
    }
}
