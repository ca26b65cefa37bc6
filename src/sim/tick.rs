//! Fixed-cadence simulation frame
//!
//! One call to `tick` is one committed frame of a running game:
//! scroll the background, move/spawn trees, burn fuel, then run the entity
//! pass (movement, collision, pickups, scoring, spawning). The entity pass
//! works on a copy of the entity list and is only written back when no car
//! was hit, so a crash frame leaves entities, score, refills and car/fuel
//! spawn distances exactly as they were before the frame.

use rand::Rng;

use super::collision::{LaneOccupancy, bike_hitbox, hits_bike};
use super::factory::{create_car, create_fuel_bottle, create_tree};
use super::state::{Entity, EntityKind, GameOverReason, GamePhase, GameState};
use crate::config::GameConfig;
use crate::wrap_offset;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Distance everything moved this frame
    pub speed: f32,
    /// Cars that left the bottom of the screen
    pub dodged: u32,
    /// Fuel bottles collected
    pub pickups: u32,
    pub spawned_car: bool,
    pub spawned_fuel: bool,
    pub spawned_tree: bool,
    /// Set when this frame ends the run. An empty tank takes precedence
    /// over a collision or a same-frame pickup.
    pub crash: Option<GameOverReason>,
}

/// Outcome of an entity pass in which no car hit the bike
struct EntityPass {
    entities: Vec<Entity>,
    dodged: u32,
    pickups: u32,
    refill: f32,
    car_distance: f32,
    fuel_distance: f32,
    spawned: Option<EntityKind>,
}

/// Advance a running game by one frame
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> FrameReport {
    if state.phase != GamePhase::Running {
        return FrameReport::default();
    }

    let boosting = state.is_boosting();
    let speed = if boosting {
        config.boost_speed
    } else {
        config.base_speed
    };
    let mut report = FrameReport {
        speed,
        ..Default::default()
    };
    state.frames += 1;

    let (min_x, max_x) = (config.lane_min_x(), config.lane_max_x());
    debug_assert!(
        (min_x..=max_x).contains(&state.player.bike_x),
        "bike_x {} outside lanes",
        state.player.bike_x
    );
    state.player.bike_x = if state.player.bike_x.is_nan() {
        min_x
    } else {
        state.player.bike_x.clamp(min_x, max_x)
    };

    scroll_background(state, config, speed);
    report.spawned_tree = move_trees(state, config, rng, speed);

    if burn_fuel(state, config, boosting) {
        log::debug!("Out of fuel on frame {}", state.frames);
        report.crash = Some(GameOverReason::OutOfFuel);
    }

    match entity_pass(state, config, rng, speed) {
        Some(pass) => {
            state.entities = pass.entities;
            state.player.score += u64::from(pass.dodged);
            if pass.refill > 0.0 {
                state.player.fuel = (state.player.fuel + pass.refill).min(config.max_fuel);
                log::debug!("Picked up fuel, now {:.1}", state.player.fuel);
            }
            state.spawn.car = pass.car_distance;
            state.spawn.fuel = pass.fuel_distance;
            if let Some(kind) = pass.spawned {
                // The candidate was built with the peeked ID
                state.next_entity_id();
                log::debug!("Spawned {:?} on frame {}", kind, state.frames);
            }

            report.dodged = pass.dodged;
            report.pickups = pass.pickups;
            report.spawned_car = matches!(pass.spawned, Some(EntityKind::Car { .. }));
            report.spawned_fuel = pass.spawned == Some(EntityKind::Fuel);
        }
        None => {
            log::debug!("Car collision on frame {}", state.frames);
            // Fuel running dry was detected first and takes precedence
            report.crash.get_or_insert(GameOverReason::Collision);
        }
    }

    debug_assert!((0.0..=config.max_fuel).contains(&state.player.fuel));
    debug_assert!(state.scroll.road_offset >= 0.0 && state.scroll.road_offset < config.road_cycle());
    debug_assert!(
        state.scroll.ground_offset >= 0.0 && state.scroll.ground_offset < config.ground_cycle()
    );

    report
}

/// Road and ground layers, wrapped to their cycle heights
fn scroll_background(state: &mut GameState, config: &GameConfig, speed: f32) {
    let scroll = &mut state.scroll;
    scroll.road_offset = wrap_offset(scroll.road_offset + speed, config.road_cycle());
    scroll.ground_offset = wrap_offset(
        scroll.ground_offset + speed * config.ground_scroll_multiplier,
        config.ground_cycle(),
    );
}

/// Move trees, drop the ones below the screen, spawn a new one when due.
/// Returns whether a tree was spawned.
fn move_trees<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    speed: f32,
) -> bool {
    let tree_speed = speed * config.tree_scroll_multiplier;
    let bottom = config.viewport_height;
    state.trees.retain_mut(|tree| {
        tree.y += tree_speed;
        tree.y < bottom
    });

    state.spawn.tree += speed;
    if state.spawn.tree < config.tree_spawn_distance {
        return false;
    }
    let id = state.next_entity_id();
    state.trees.push(create_tree(config, rng, id));
    state.spawn.tree = 0.0;
    true
}

/// Burn this frame's fuel. Returns true if the tank just ran dry.
fn burn_fuel(state: &mut GameState, config: &GameConfig, boosting: bool) -> bool {
    let multiplier = if boosting {
        config.boost_fuel_multiplier
    } else {
        1.0
    };
    let next = state.player.fuel - config.fuel_decrease_rate * multiplier;
    state.player.fuel = if next.is_nan() {
        0.0
    } else {
        next.clamp(0.0, config.max_fuel)
    };
    state.player.fuel == 0.0
}

/// Move entities, resolve contacts, and attempt spawns against a copy of the
/// entity list. Returns `None` if a car hit the bike.
fn entity_pass<R: Rng + ?Sized>(
    state: &GameState,
    config: &GameConfig,
    rng: &mut R,
    speed: f32,
) -> Option<EntityPass> {
    // Lane occupancy comes from where cars were before this frame moved them
    let occupancy = LaneOccupancy::scan(&state.entities, config);
    let bike = bike_hitbox(state.player.bike_x, config);
    let bottom = config.viewport_height;

    let mut pass = EntityPass {
        entities: Vec::with_capacity(state.entities.len() + 1),
        dodged: 0,
        pickups: 0,
        refill: 0.0,
        car_distance: state.spawn.car + speed,
        fuel_distance: state.spawn.fuel,
        spawned: None,
    };

    for entity in &state.entities {
        let mut moved = entity.clone();
        moved.y += speed;

        if hits_bike(&bike, &moved, config) {
            match moved.kind {
                EntityKind::Car { .. } => return None,
                EntityKind::Fuel => {
                    pass.refill += config.fuel_pickup_amount;
                    pass.pickups += 1;
                    continue;
                }
            }
        }

        if moved.y > bottom {
            if moved.kind.is_car() {
                pass.dodged += 1;
            }
        } else {
            pass.entities.push(moved);
        }
    }

    // Cars take priority; fuel is only considered on frames without a new car
    let id = state.peek_entity_id();
    if pass.car_distance >= config.car_spawn_distance {
        let candidate = create_car(config, rng, id);
        if occupancy.admits(&candidate, config) {
            pass.spawned = Some(candidate.kind);
            pass.entities.push(candidate);
            pass.car_distance = 0.0;
        }
    }
    if pass.spawned.is_none() {
        pass.fuel_distance += speed;
        if pass.fuel_distance >= config.fuel_spawn_distance
            && rng.random_bool(config.fuel_spawn_chance)
        {
            let candidate = create_fuel_bottle(config, rng, id);
            if occupancy.admits(&candidate, config) {
                pass.spawned = Some(candidate.kind);
                pass.entities.push(candidate);
                pass.fuel_distance = 0.0;
            }
        }
    }

    Some(pass)
}
