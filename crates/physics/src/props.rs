//! Loose props: the shapes and masses of things that fall and settle.

use engine_core::Vec3;

/// Collision shape of a prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropShape {
    Cuboid { half_extents: Vec3 },
    Cylinder { half_height: f32, radius: f32 },
}

/// Everything needed to drop a prop into the world.
#[derive(Debug, Clone)]
pub struct PropSpec {
    pub name: String,
    pub shape: PropShape,
    pub position: Vec3,
    pub mass: f32,
}

impl PropSpec {
    /// The starting props: a sword and a health potion, both
    /// released from two metres up so they visibly fall.
    pub fn starter_props() -> Vec<PropSpec> {
        vec![
            PropSpec {
                name: "sword".to_string(),
                shape: PropShape::Cuboid {
                    half_extents: Vec3::new(0.1, 0.5, 0.02),
                },
                position: Vec3::new(0.0, 2.0, 5.0),
                mass: 1.0,
            },
            PropSpec {
                name: "health_potion".to_string(),
                shape: PropShape::Cylinder {
                    half_height: 0.15,
                    radius: 0.08,
                },
                position: Vec3::new(3.0, 2.0, 5.0),
                mass: 0.5,
            },
        ]
    }
}
