//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different body types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground slab, walls)
    Environment = 1 << 0,
    /// Loose props (pickups, debris)
    Prop = 1 << 1,
}

impl CollisionGroup {
    /// Membership and filter for static environment colliders.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Environment as u32),
            Group::ALL,
        )
    }

    /// Membership and filter for props: they rest on the environment and on each other.
    pub fn prop() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Prop as u32),
            Group::from_bits_retain(Self::Environment as u32 | Self::Prop as u32),
        )
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_collide_with_environment() {
        let env = CollisionGroup::environment();
        let prop = CollisionGroup::prop();
        assert!(env.test(prop));
        assert!(prop.test(prop));
    }
}
