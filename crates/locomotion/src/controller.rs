//! The character controller: input → motion → pose, once per frame.

use crate::config::{ConfigError, LocomotionConfig};
use crate::gait::LimbAngles;
use crate::intent::{is_forward, lean_target, move_intent, world_intent};
use crate::movement::{can_sprint, resolve_move_speed, SlopeCheck};
use crate::rig::{project_pose, PoseFrame, RigAnchor, RigTransforms};
use crate::state::{BodyHeights, Edge, PoseState};
use crate::yaw::{chase_torso_yaw, resolve_leg_yaw};
use engine_core::{collides_or_clear, height_or_flat, TerrainQuery, Vec2, Vec3};
use input::{Action, ActionSource};
use std::f32::consts::FRAC_PI_2;

/// Feet this close above the ground still count as standing on it.
const CONTACT_TOLERANCE: f32 = 1e-4;

/// Drives one character.
///
/// Call [`handle_input`](Self::handle_input) then [`update`](Self::update)
/// once per frame, then project the result with
/// [`update_body`](Self::update_body) / [`update_mirrored_body`](Self::update_mirrored_body).
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub pose: PoseState,
    config: LocomotionConfig,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::from_valid(LocomotionConfig::default())
    }
}

impl PlayerController {
    /// A standing controller at the origin.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: LocomotionConfig) -> Self {
        let pose = PoseState::standing_at(Vec3::ZERO, config.walk_speed, &config.rig);
        Self { pose, config }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Put the feet on the ground at (x, z).
    pub fn place_on_ground(&mut self, x: f32, z: f32, terrain: Option<&dyn TerrainQuery>) {
        let ground = height_or_flat(terrain, x, z);
        self.pose.position = Vec3::new(x, ground + self.pose.heights.eye_height, z);
        self.pose.velocity = Vec3::ZERO;
        self.pose.grounded = true;
        self.pose.is_jumping = false;
        log::info!("Character placed at ({:.2}, {:.2}, {:.2})", x, ground, z);
    }

    /// Read this frame's held actions into intent and flags. Returns the
    /// local move intent.
    pub fn handle_input(&mut self, input: &impl ActionSource) -> Vec3 {
        let pose = &mut self.pose;
        pose.move_intent = move_intent(input);

        if pose.crouch_key.update(input.is_action_held(Action::Crouch)) == Edge::Rising {
            pose.is_crouching = !pose.is_crouching;
            log::debug!("Crouch toggled: {}", pose.is_crouching);
        }

        pose.is_sprinting = input.is_action_held(Action::Sprint) && can_sprint(pose);

        // Jump fires on release so a held key cannot repeat it.
        if pose.jump_key.update(input.is_action_held(Action::Jump)) == Edge::Falling
            && pose.grounded
            && !pose.is_jumping
        {
            pose.velocity.y = self.config.jump_strength();
            pose.is_jumping = true;
            pose.grounded = false;
            log::debug!("Jump: vy = {:.2}", pose.velocity.y);
        }

        pose.lean.target = lean_target(input);
        pose.move_intent
    }

    /// Apply a mouse delta to the look angles.
    pub fn look(&mut self, mouse_delta: Vec2) {
        let sensitivity = self.config.look_sensitivity;
        self.pose.yaw -= mouse_delta.x * sensitivity;
        self.pose.pitch = (self.pose.pitch - mouse_delta.y * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Freeze horizontal movement (e.g. while a menu is open). Gravity and an
    /// ongoing jump keep integrating.
    pub fn set_movement_suppressed(&mut self, suppressed: bool) {
        if self.pose.movement_suppressed != suppressed {
            log::debug!("Movement suppressed: {}", suppressed);
        }
        self.pose.movement_suppressed = suppressed;
    }

    pub fn stamina(&self) -> f32 {
        self.pose.stamina
    }

    /// Advance the simulation by `delta` seconds (clamped to the stable range).
    pub fn update(&mut self, delta: f32, terrain: Option<&dyn TerrainQuery>) {
        let dt = self.config.clamp_delta(delta);

        if self.pose.movement_suppressed {
            self.pose.move_intent = Vec3::ZERO;
            self.pose.velocity.x = 0.0;
            self.pose.velocity.z = 0.0;
        }
        if self.pose.is_sprinting && !can_sprint(&self.pose) {
            self.pose.is_sprinting = false;
        }

        let move_speed = resolve_move_speed(&mut self.pose, &self.config, dt);
        self.pose.move_speed = move_speed;
        if self.pose.stamina <= 0.0 && self.pose.is_sprinting {
            self.pose.is_sprinting = false;
            log::debug!("Out of stamina");
        }

        self.turn(dt);
        self.move_horizontally(dt, move_speed, terrain);
        self.blend_stance(dt);

        let walking = self.pose.has_intent() && self.pose.grounded && !self.pose.is_jumping;
        self.pose
            .walk
            .advance(dt, move_speed, self.config.gait.walk_frequency, walking);
        self.pose.limbs =
            LimbAngles::synthesize(self.pose.walk.phase, self.pose.leg_bend.value, &self.config.gait);
        let previous_eye = self.pose.heights.eye_height;
        self.pose.heights = BodyHeights::from_leg_bend(self.pose.leg_bend.value, &self.config.rig);
        // Bending the legs lowers the eye, not the feet.
        self.pose.position.y += self.pose.heights.eye_height - previous_eye;

        self.move_vertically(dt, terrain);
        self.blend_lean(dt);
    }

    fn turn(&mut self, dt: f32) {
        let max_step = self.config.torso_turn_speed * dt;
        let pose = &mut self.pose;
        pose.torso_yaw = chase_torso_yaw(pose.torso_yaw, pose.yaw, max_step);
        pose.leg_yaw = resolve_leg_yaw(
            pose.torso_yaw,
            pose.leg_yaw,
            self.config.torso_turn_threshold,
            max_step,
            is_forward(pose.move_intent),
        );
    }

    fn move_horizontally(&mut self, dt: f32, move_speed: f32, terrain: Option<&dyn TerrainQuery>) {
        if self.pose.grounded {
            let heading = world_intent(self.pose.move_intent, self.pose.yaw) * move_speed;
            self.pose.velocity.x = heading.x;
            self.pose.velocity.z = heading.z;
        }

        let step = Vec3::new(self.pose.velocity.x, 0.0, self.pose.velocity.z) * dt;
        if step == Vec3::ZERO {
            return;
        }
        let previous = self.pose.position;
        self.pose.position += step;
        match self.footing(terrain) {
            Some(rise) => self.pose.position.y += rise,
            None => {
                self.pose.position.x = previous.x;
                self.pose.position.z = previous.z;
                log::debug!(
                    "Blocked at ({:.2}, {:.2})",
                    self.pose.position.x,
                    self.pose.position.z
                );
            }
        }
    }

    fn blend_stance(&mut self, dt: f32) {
        let pose = &mut self.pose;
        let (forward_lean, bend) = if pose.is_crouching {
            (self.config.max_crouch_forward_lean, self.config.max_leg_bend)
        } else {
            (0.0, 0.0)
        };
        pose.crouch_forward_lean.target = forward_lean;
        pose.crouch_forward_lean
            .step(self.config.crouch_forward_lean_speed, dt);
        pose.leg_bend.target = bend;
        pose.leg_bend.step(self.config.leg_bend_speed, dt);
    }

    fn move_vertically(&mut self, dt: f32, terrain: Option<&dyn TerrainQuery>) {
        let pose = &mut self.pose;
        if pose.grounded {
            pose.velocity.y = 0.0;
        } else {
            pose.velocity.y += self.config.gravity * dt;
        }
        pose.position.y += pose.velocity.y * dt;

        let ground = height_or_flat(terrain, pose.position.x, pose.position.z);
        let eye_height = pose.heights.eye_height;
        let feet = pose.position.y - eye_height;
        let clearance = feet - ground;

        if clearance <= CONTACT_TOLERANCE {
            pose.position.y = ground + eye_height;
            if !pose.grounded {
                log::debug!("Landed at height {:.2}", ground);
            }
            pose.grounded = true;
            pose.is_jumping = false;
            pose.velocity.y = 0.0;
        } else {
            pose.grounded = false;
        }
    }

    fn blend_lean(&mut self, dt: f32) {
        let lean = &mut self.pose.lean;
        lean.step(self.config.lean_speed, dt);
        if lean.value.abs() < 0.01 && lean.target == 0.0 {
            lean.value = 0.0;
        }
        lean.value = lean.value.clamp(-self.config.max_lean, self.config.max_lean);
    }

    /// Probe points for obstacle tests: above the step height, mid-body and
    /// at the eye.
    fn body_probes(&self) -> [Vec3; 3] {
        let feet = self.pose.feet();
        let eye_height = self.pose.heights.eye_height;
        [
            feet + Vec3::Y * self.config.max_step_up,
            feet + Vec3::Y * (eye_height * 0.5),
            self.pose.position,
        ]
    }

    /// Whether the character may not stand where it is now.
    ///
    /// True when the body overlaps an obstacle, or when the ground a short
    /// probe ahead along the move direction is too steep or too tall to
    /// step onto. With no provider, movement is always allowed.
    pub fn check_collision(&self, terrain: Option<&dyn TerrainQuery>) -> bool {
        self.footing(terrain).is_none()
    }

    /// `None` when the current position is blocked, otherwise the walkable
    /// height change ahead that the vertical position should absorb.
    fn footing(&self, terrain: Option<&dyn TerrainQuery>) -> Option<f32> {
        if self
            .body_probes()
            .iter()
            .any(|&point| collides_or_clear(terrain, point))
        {
            return None;
        }
        let Some(map) = terrain else {
            return Some(0.0);
        };
        if !self.pose.grounded || !self.pose.has_intent() {
            return Some(0.0);
        }

        let direction = world_intent(self.pose.move_intent, self.pose.yaw);
        let here = self.pose.position;
        let ahead = here + direction * self.config.slope_probe_distance;
        let check = SlopeCheck::evaluate(
            map.height_at(here.x, here.z),
            map.height_at(ahead.x, ahead.z),
            &self.config,
        );
        if check.blocks() {
            log::debug!("Slope refused: {:?}", check);
            return None;
        }
        match check {
            SlopeCheck::Absorb(rise) => Some(rise),
            _ => Some(0.0),
        }
    }

    /// Ground height under the character (0 without a provider).
    pub fn terrain_height(&self, terrain: Option<&dyn TerrainQuery>) -> f32 {
        height_or_flat(terrain, self.pose.position.x, self.pose.position.z)
    }

    /// Forward kinematics for the current pose, not yet placed.
    pub fn pose_frame(&self) -> PoseFrame {
        project_pose(&self.pose, &self.config)
    }

    /// The character's own rig, feet on the character.
    pub fn update_body(&self) -> RigTransforms {
        self.pose_frame().place(&RigAnchor::Follow)
    }

    /// The same pose on a rig rooted at `anchor`.
    pub fn update_mirrored_body(&self, anchor: &RigAnchor) -> RigTransforms {
        self.pose_frame().place(anchor)
    }
}
