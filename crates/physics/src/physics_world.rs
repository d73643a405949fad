//! Physics world management with Rapier3D.

use crate::collision::{CollisionGroup, PhysicsBody};
use crate::props::{PropShape, PropSpec};
use engine_core::{Transform, Vec3};
use rapier3d::na::{Isometry3, Vector3};
use rapier3d::prelude::*;

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the simulation by `dt` seconds (the frame delta).
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a thin static ground slab whose top face sits at `height`.
    pub fn add_ground_slab(&mut self, half_size: f32, height: f32) -> ColliderHandle {
        const HALF_THICKNESS: f32 = 0.1;
        self.add_static_cuboid(
            Vec3::new(0.0, height - HALF_THICKNESS, 0.0),
            0.0,
            Vec3::new(half_size, HALF_THICKNESS, half_size),
        )
    }

    /// Add a static cuboid collider with no parent body.
    /// `rotation_y_rad`: rotation around Y axis in radians.
    pub fn add_static_cuboid(
        &mut self,
        translation: Vec3,
        rotation_y_rad: f32,
        half_extents: Vec3,
    ) -> ColliderHandle {
        let tra = vector![translation.x, translation.y, translation.z];
        let axisangle = Vector3::y_axis().into_inner() * (rotation_y_rad as Real);
        let position = Isometry3::new(tra, axisangle);
        let collider = ColliderBuilder::cuboid(
            half_extents.x as Real,
            half_extents.y as Real,
            half_extents.z as Real,
        )
        .position(position)
        .collision_groups(CollisionGroup::environment())
        .build();
        self.collider_set.insert(collider)
    }

    /// Drop a dynamic prop into the world.
    pub fn add_prop(&mut self, spec: &PropSpec) -> PhysicsBody {
        let p = spec.position;
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![p.x, p.y, p.z])
            .build();
        let body_handle = self.rigid_body_set.insert(body);

        let builder = match spec.shape {
            PropShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            PropShape::Cylinder { half_height, radius } => {
                ColliderBuilder::cylinder(half_height, radius)
            }
        };
        let collider = builder
            .mass(spec.mass)
            .collision_groups(CollisionGroup::prop())
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        log::info!(
            "Prop '{}' added at ({:.2}, {:.2}, {:.2}), mass {}",
            spec.name,
            p.x,
            p.y,
            p.z,
            spec.mass
        );
        PhysicsBody::with_collider(body_handle, collider_handle)
    }

    /// Get the transform of a rigid body.
    pub fn get_body_transform(&self, handle: RigidBodyHandle) -> Option<Transform> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            let rot = body.rotation();
            Transform {
                position: Vec3::new(pos.x, pos.y, pos.z),
                rotation: glam::Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w),
                scale: Vec3::ONE,
            }
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_prop_settles_on_ground_slab() {
        let mut world = PhysicsWorld::new();
        world.add_ground_slab(50.0, 0.0);
        let spec = PropSpec {
            name: "crate".to_string(),
            shape: PropShape::Cuboid {
                half_extents: Vec3::splat(0.25),
            },
            position: Vec3::new(0.0, 2.0, 0.0),
            mass: 1.0,
        };
        let body = world.add_prop(&spec);
        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }
        let t = world.get_body_transform(body.rigid_body).unwrap();
        assert!(t.position.y < 1.0, "prop should have fallen, y = {}", t.position.y);
        assert!(t.position.y > 0.0, "prop should rest on the slab, y = {}", t.position.y);
    }

    #[test]
    fn starter_props_spawn_where_specified() {
        let mut world = PhysicsWorld::new();
        for spec in PropSpec::starter_props() {
            let body = world.add_prop(&spec);
            assert!(body.collider.is_some());
            let t = world.get_body_transform(body.rigid_body).unwrap();
            assert_eq!(t.position, spec.position);
        }
    }

    #[test]
    fn zero_dt_step_is_ignored() {
        let mut world = PhysicsWorld::new();
        let body = world.add_prop(&PropSpec::starter_props()[0]);
        world.step(0.0);
        let t = world.get_body_transform(body.rigid_body).unwrap();
        assert_eq!(t.position, Vec3::new(0.0, 2.0, 5.0));
    }
}
