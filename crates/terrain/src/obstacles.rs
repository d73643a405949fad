//! Solid boxes the character cannot walk into.

use glam::Vec3;

/// A solid box, optionally turned about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleBox {
    pub center: Vec3,
    /// Full extents along the box's local axes.
    pub size: Vec3,
    /// Rotation about Y in radians. `0.0` is axis-aligned.
    pub yaw: f32,
}

impl ObstacleBox {
    pub fn axis_aligned(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            size,
            yaw: 0.0,
        }
    }

    pub fn rotated(center: Vec3, size: Vec3, yaw: f32) -> Self {
        Self { center, size, yaw }
    }

    /// Strict interior test; points exactly on a face are outside.
    pub fn contains(&self, point: Vec3) -> bool {
        let local = point - self.center;
        // Undo the box yaw so the test happens in box space.
        let (sin, cos) = (-self.yaw).sin_cos();
        let x = local.x * cos + local.z * sin;
        let z = -local.x * sin + local.z * cos;
        let half = self.size * 0.5;
        x.abs() < half.x && local.y.abs() < half.y && z.abs() < half.z
    }
}

/// A flat list of obstacles, tested in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    boxes: Vec<ObstacleBox>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: ObstacleBox) {
        self.boxes.push(obstacle);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstacleBox> {
        self.boxes.iter()
    }

    /// Whether any obstacle contains the point.
    pub fn contains(&self, point: Vec3) -> bool {
        self.boxes.iter().any(|b| b.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn axis_aligned_box_is_strict() {
        let b = ObstacleBox::axis_aligned(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(b.contains(Vec3::new(0.5, 1.5, -0.5)));
        assert!(!b.contains(Vec3::new(1.0, 1.0, 0.0)), "face is outside");
        assert!(!b.contains(Vec3::new(0.0, 2.5, 0.0)));
    }

    #[test]
    fn rotated_box_tests_in_local_space() {
        // A long thin wall along X, turned 45°.
        let b = ObstacleBox::rotated(Vec3::ZERO, Vec3::new(4.0, 2.0, 0.2), FRAC_PI_4);
        let along = Vec3::new(1.0, 0.0, -1.0).normalize() * 1.5;
        let across = Vec3::new(1.0, 0.0, 1.0).normalize() * 1.5;
        assert!(b.contains(along));
        assert!(!b.contains(across));
        // Unrotated, the same point along the diagonal is outside the thin wall.
        let flat = ObstacleBox::axis_aligned(Vec3::ZERO, Vec3::new(4.0, 2.0, 0.2));
        assert!(!flat.contains(along));
    }

    #[test]
    fn set_reports_any_hit() {
        let mut set = ObstacleSet::new();
        assert!(!set.contains(Vec3::ZERO));
        set.push(ObstacleBox::axis_aligned(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE));
        set.push(ObstacleBox::axis_aligned(Vec3::new(-5.0, 0.0, 0.0), Vec3::ONE));
        assert!(set.contains(Vec3::new(-5.2, 0.0, 0.1)));
        assert!(!set.contains(Vec3::ZERO));
        assert_eq!(set.len(), 2);
    }
}
