//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Called once per committed frame (throttling happens in `crate::game`)
//! - Seeded RNG only, passed in by the caller
//! - Entities kept in spawn order
//! - No rendering or platform dependencies

pub mod boost;
pub mod collision;
pub mod factory;
pub mod snapshot;
pub mod state;
pub mod steering;
pub mod tick;
pub mod timer;

pub use boost::{BoostPhase, BoostTimer};
pub use collision::{Aabb, Lane, LaneOccupancy, bike_hitbox, entity_hitbox, hits_bike};
pub use factory::{create_car, create_fuel_bottle, create_tree};
pub use snapshot::{FuelLevel, Snapshot};
pub use state::{
    CanopyColor, Entity, EntityKind, GameOverReason, GamePhase, GameState, PlayerState,
    ScrollState, SpawnDistances, Tree,
};
pub use steering::{Steering, SteeringHandle};
pub use tick::{FrameReport, tick};
pub use timer::Countdown;
