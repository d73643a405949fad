//! Terrain and obstacle queries consumed by character controllers.

use glam::Vec3;

/// Read-only view of the walkable world.
///
/// Implementations must be pure and cheap: the controller samples them several
/// times per frame and never caches the answers.
pub trait TerrainQuery {
    /// Ground height at a horizontal position.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Whether a world-space point lies inside a solid obstacle.
    fn collides(&self, _point: Vec3) -> bool {
        false
    }
}

/// Height at (x, z), or flat ground at 0 when no provider is attached.
pub fn height_or_flat(terrain: Option<&dyn TerrainQuery>, x: f32, z: f32) -> f32 {
    terrain.map_or(0.0, |t| t.height_at(x, z))
}

/// Obstacle test that allows movement when no provider is attached.
pub fn collides_or_clear(terrain: Option<&dyn TerrainQuery>, point: Vec3) -> bool {
    terrain.is_some_and(|t| t.collides(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Step;

    impl TerrainQuery for Step {
        fn height_at(&self, x: f32, _z: f32) -> f32 {
            if x > 0.0 { 1.0 } else { 0.0 }
        }
    }

    #[test]
    fn missing_provider_is_flat_and_clear() {
        assert_eq!(height_or_flat(None, 12.0, -4.0), 0.0);
        assert!(!collides_or_clear(None, Vec3::ZERO));
    }

    #[test]
    fn provider_is_consulted() {
        let step = Step;
        assert_eq!(height_or_flat(Some(&step), 2.0, 0.0), 1.0);
        assert_eq!(height_or_flat(Some(&step), -2.0, 0.0), 0.0);
        // Default collision answer is "clear".
        assert!(!collides_or_clear(Some(&step), Vec3::ONE));
    }
}
