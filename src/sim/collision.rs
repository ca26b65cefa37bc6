//! Collision detection and spawn fairness
//!
//! Hitboxes are sprite bounds trimmed per side (see `config::Hitboxes`), and
//! overlap is strict: boxes that only share an edge do not collide.

use glam::Vec2;

use super::state::{Entity, EntityKind};
use crate::config::{GameConfig, Insets};

/// Axis-aligned bounding box in screen space (Y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// Trim each side independently (negative insets grow the box)
    pub fn inset(self, insets: &Insets) -> Self {
        Self::new(
            self.min + Vec2::new(insets.left, insets.top),
            self.max - Vec2::new(insets.right, insets.bottom),
        )
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The bike's hitbox at horizontal position `bike_x`
pub fn bike_hitbox(bike_x: f32, config: &GameConfig) -> Aabb {
    Aabb::from_rect(bike_x, config.bike_y(), config.bike_width, config.bike_height)
        .inset(&config.hitboxes.bike)
}

pub fn entity_hitbox(entity: &Entity, config: &GameConfig) -> Aabb {
    let insets = match entity.kind {
        EntityKind::Car { .. } => &config.hitboxes.car,
        EntityKind::Fuel => &config.hitboxes.fuel,
    };
    Aabb::from_rect(entity.x, entity.y, entity.width, entity.height).inset(insets)
}

/// Does this entity touch the bike?
#[inline]
pub fn hits_bike(bike: &Aabb, entity: &Entity, config: &GameConfig) -> bool {
    bike.overlaps(&entity_hitbox(entity, config))
}

/// One of the two spawn lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Right => 1,
        }
    }

    /// Lane containing a horizontal center point
    pub fn of(center_x: f32, config: &GameConfig) -> Self {
        if center_x < config.road_midline() {
            Lane::Left
        } else {
            Lane::Right
        }
    }
}

/// Lanes blocked for spawning because a car is still near the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneOccupancy {
    occupied: [bool; 2],
}

impl LaneOccupancy {
    /// Mark the lane of every car still inside the top guard band
    pub fn scan(entities: &[Entity], config: &GameConfig) -> Self {
        let guard_y = config.spawn_guard_y();
        let mut occupancy = Self::default();
        for entity in entities
            .iter()
            .filter(|e| e.kind.is_car() && e.y < guard_y)
        {
            occupancy.mark(Lane::of(entity.center_x(), config));
        }
        occupancy
    }

    pub fn mark(&mut self, lane: Lane) {
        self.occupied[lane.index()] = true;
    }

    pub fn is_occupied(&self, lane: Lane) -> bool {
        self.occupied[lane.index()]
    }

    /// Can this spawn candidate be committed?
    pub fn admits(&self, candidate: &Entity, config: &GameConfig) -> bool {
        !self.is_occupied(Lane::of(candidate.center_x(), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_at(x: f32, y: f32, config: &GameConfig) -> Entity {
        Entity {
            id: 1,
            kind: EntityKind::Car { sprite: 0 },
            x,
            y,
            width: config.car_width,
            height: config.car_height,
        }
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::from_rect(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!right.overlaps(&a));
        assert!(!a.overlaps(&below));

        let nudged = Aabb::from_rect(9.99, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&nudged));
        assert!(nudged.overlaps(&a));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Aabb::from_rect(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::from_rect(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_insets_trim_each_side() {
        let b = Aabb::from_rect(0.0, 0.0, 40.0, 80.0).inset(&Insets::new(5.0, 5.0, 30.0, 30.0));
        assert_eq!(b.min, Vec2::new(5.0, 30.0));
        assert_eq!(b.max, Vec2::new(35.0, 50.0));

        let grown = Aabb::from_rect(0.0, 0.0, 80.0, 150.0).inset(&Insets::new(-10.0, -10.0, 0.0, 70.0));
        assert_eq!(grown.min, Vec2::new(-10.0, 0.0));
        assert_eq!(grown.max, Vec2::new(90.0, 80.0));
    }

    #[test]
    fn test_bike_hitbox_position() {
        let config = GameConfig::default();
        let bike = bike_hitbox(100.0, &config);
        // Bike sprite spans y 700..780, trimmed 30 top and bottom
        assert_eq!(bike.min, Vec2::new(105.0, 730.0));
        assert_eq!(bike.max, Vec2::new(135.0, 750.0));
    }

    #[test]
    fn test_car_edge_touching_bike_misses() {
        let config = GameConfig::default();
        let bike = bike_hitbox(100.0, &config);
        // Car hitbox left edge (x - 10) lands exactly on the bike's right edge
        let car = car_at(bike.max.x + 10.0, config.bike_y(), &config);
        assert_eq!(entity_hitbox(&car, &config).min.x, bike.max.x);
        assert!(!hits_bike(&bike, &car, &config));

        let car = car_at(bike.max.x + 9.0, config.bike_y(), &config);
        assert!(hits_bike(&bike, &car, &config));
    }

    #[test]
    fn test_lane_of_midline() {
        let config = GameConfig::default();
        let mid = config.road_midline();
        assert_eq!(Lane::of(mid - 0.01, &config), Lane::Left);
        assert_eq!(Lane::of(mid, &config), Lane::Right);
    }

    #[test]
    fn test_occupancy_only_counts_cars_near_top() {
        let config = GameConfig::default();
        let guard = config.spawn_guard_y();
        let left_x = config.road_start_x() + 10.0;
        let right_x = config.road_midline() + 10.0;

        let mut fuel = car_at(right_x, -40.0, &config);
        fuel.kind = EntityKind::Fuel;
        let entities = vec![
            car_at(left_x, -150.0, &config),
            // Already past the guard band
            car_at(right_x, guard + 1.0, &config),
            // Fuel never blocks a lane
            fuel,
        ];

        let occupancy = LaneOccupancy::scan(&entities, &config);
        assert!(occupancy.is_occupied(Lane::Left));
        assert!(!occupancy.is_occupied(Lane::Right));
    }

    #[test]
    fn test_occupied_lane_rejects_candidate() {
        let config = GameConfig::default();
        let existing = car_at(config.road_start_x() + 20.0, 0.0, &config);
        let occupancy = LaneOccupancy::scan(&[existing], &config);

        let left_candidate = car_at(config.road_start_x() + 50.0, -150.0, &config);
        let right_candidate = car_at(config.road_midline() + 30.0, -150.0, &config);
        assert!(!occupancy.admits(&left_candidate, &config));
        assert!(occupancy.admits(&right_candidate, &config));
    }
}
