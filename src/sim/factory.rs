//! Entity constructors with randomized placement
//!
//! Pure functions of the config and the RNG; the caller supplies the ID so
//! the counter stays owned by `GameState`.

use rand::Rng;

use super::collision::Lane;
use super::state::{CanopyColor, Entity, EntityKind, Tree};
use crate::config::GameConfig;

/// Place an entity of the given size at a random X inside a random lane,
/// just above the visible area
fn create_in_lane<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
    id: u32,
    kind: EntityKind,
    width: f32,
    height: f32,
) -> Entity {
    let lane = if rng.random_bool(0.5) {
        Lane::Left
    } else {
        Lane::Right
    };
    let lane_start = config.road_start_x() + lane.index() as f32 * config.lane_width();
    let span = (config.lane_width() - width).max(0.0);
    let x = lane_start + rng.random::<f32>() * span;

    Entity {
        id,
        kind,
        x,
        y: -height,
        width,
        height,
    }
}

/// A car in a random lane with a random sprite
pub fn create_car<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R, id: u32) -> Entity {
    let sprite = rng.random_range(0..config.car_sprite_count.max(1));
    create_in_lane(
        config,
        rng,
        id,
        EntityKind::Car { sprite },
        config.car_width,
        config.car_height,
    )
}

pub fn create_fuel_bottle<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R, id: u32) -> Entity {
    create_in_lane(
        config,
        rng,
        id,
        EntityKind::Fuel,
        config.fuel_width,
        config.fuel_height,
    )
}

/// A tree on a random shoulder, never overlapping the road
pub fn create_tree<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R, id: u32) -> Tree {
    let left_side = rng.random_bool(0.5);
    let width = config.tree_width.lerp(rng.random());
    let height = config.tree_height.lerp(rng.random());
    let gap = rng.random::<f32>() * config.tree_shoulder_gap.max(0.0);

    let x = if left_side {
        config.road_start_x() - width - gap
    } else {
        config.road_start_x() + config.road_width() + gap
    };

    let trunk_height = height * (0.2 + rng.random::<f32>() * 0.2);
    let canopy_height = height - trunk_height;
    let canopy_width = width * (0.8 + rng.random::<f32>() * 0.4);

    // Green-ish band
    let canopy_color = CanopyColor {
        hue: rng.random_range(90..150),
        saturation: rng.random_range(40..70),
        lightness: rng.random_range(30..50),
    };

    Tree {
        id,
        x,
        y: -height,
        width,
        height,
        trunk_height,
        canopy_height,
        canopy_width,
        canopy_color,
    }
}
