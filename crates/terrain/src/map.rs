//! The walkable map: a ground surface plus solid obstacles.

use engine_core::{TerrainQuery, Vec3};

use crate::{FlatGround, Heightmap, HeightmapConfig, ObstacleBox, ObstacleSet};

/// Ground surface kinds.
#[derive(Debug, Clone)]
pub enum Ground {
    Flat(FlatGround),
    Heightmap(Heightmap),
}

impl Ground {
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        match self {
            Ground::Flat(flat) => flat.height_at(x, z),
            Ground::Heightmap(map) => map.height_at(x, z),
        }
    }
}

/// Ground plus obstacles, answering every terrain query the controller makes.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub ground: Ground,
    pub obstacles: ObstacleSet,
}

impl Default for GameMap {
    fn default() -> Self {
        Self::flat(0.0)
    }
}

impl GameMap {
    /// Empty flat map at the given height.
    pub fn flat(height: f32) -> Self {
        Self {
            ground: Ground::Flat(FlatGround::new(height)),
            obstacles: ObstacleSet::new(),
        }
    }

    /// Empty map over generated noise terrain.
    pub fn rolling(config: HeightmapConfig) -> Self {
        Self {
            ground: Ground::Heightmap(Heightmap::generate(config)),
            obstacles: ObstacleSet::new(),
        }
    }

    /// The starting area: sword and potion pickups, a treasure
    /// chest, and a stone wall. Obstacle heights are offset by the ground
    /// height at their footprint.
    pub fn starter(ground: Ground) -> Self {
        let mut map = Self {
            ground,
            obstacles: ObstacleSet::new(),
        };
        let boxes = [
            // Sword, standing on its tip where it spawns.
            (Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.2, 0.6, 0.04)),
            // Health potion.
            (Vec3::new(3.0, 2.0, 5.0), Vec3::new(0.16, 0.3, 0.16)),
            // Treasure chest body.
            (Vec3::new(-5.0, 0.4, 5.0), Vec3::new(1.2, 0.8, 0.8)),
            // Stone wall.
            (Vec3::new(-8.0, 1.0, 5.0), Vec3::new(1.0, 2.0, 4.0)),
        ];
        for (center, size) in boxes {
            let base = map.ground.height_at(center.x, center.z);
            map.obstacles
                .push(ObstacleBox::axis_aligned(center + Vec3::Y * base, size));
        }
        log::info!("Starter map built with {} obstacles", map.obstacles.len());
        map
    }

    pub fn add_obstacle(&mut self, obstacle: ObstacleBox) {
        self.obstacles.push(obstacle);
    }
}

impl TerrainQuery for GameMap {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.ground.height_at(x, z)
    }

    fn collides(&self, point: Vec3) -> bool {
        self.obstacles.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_map_blocks_the_chest() {
        let map = GameMap::starter(Ground::Flat(FlatGround::new(0.0)));
        assert_eq!(map.obstacles.len(), 4);
        assert!(map.collides(Vec3::new(-5.0, 0.5, 5.0)));
        assert!(!map.collides(Vec3::new(0.0, 0.9, 20.0)));
        assert_eq!(map.height_at(10.0, -3.0), 0.0);
    }

    #[test]
    fn obstacles_sit_on_raised_ground() {
        let map = GameMap::starter(Ground::Flat(FlatGround::new(3.0)));
        // Chest centre moves up with the ground.
        assert!(map.collides(Vec3::new(-5.0, 3.4, 5.0)));
        assert!(!map.collides(Vec3::new(-5.0, 0.4, 5.0)));
    }

    #[test]
    fn rolling_map_uses_heightmap() {
        let config = HeightmapConfig {
            size: 32.0,
            resolution: 17,
            height_scale: 6.0,
            seed: 7,
            ..Default::default()
        };
        let map = GameMap::rolling(config.clone());
        let direct = Heightmap::generate(config);
        assert_eq!(map.height_at(3.3, -7.1), direct.height_at(3.3, -7.1));
    }
}
