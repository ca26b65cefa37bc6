//! Read-only view of the game for renderers
//!
//! The renderer never touches `GameState`; it gets a `Snapshot` after each
//! committed frame and interpolates (bike smoothing, crash effects) on its own.

use serde::{Deserialize, Serialize};

use super::boost::BoostPhase;
use super::state::{Entity, GameOverReason, GamePhase, GameState, Tree};
use crate::config::GameConfig;

/// Fuel gauge band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelLevel {
    Healthy,
    Low,
    Critical,
}

impl FuelLevel {
    /// Band for `fuel`, measured against a full tank
    pub fn from_fuel(fuel: f32, config: &GameConfig) -> Self {
        let share = fuel / config.max_fuel;
        if share > config.fuel_low_fraction {
            FuelLevel::Healthy
        } else if share > config.fuel_critical_fraction {
            FuelLevel::Low
        } else {
            FuelLevel::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    pub bike_x: f32,
    pub bike_y: f32,
    pub entities: Vec<Entity>,
    pub trees: Vec<Tree>,
    pub road_offset: f32,
    pub ground_offset: f32,
    pub score: u64,
    pub fuel: f32,
    /// Fuel as a share of a full tank, for the gauge width
    pub fuel_fraction: f32,
    pub fuel_level: FuelLevel,
    pub boost: BoostPhase,
    pub is_boosting: bool,
    pub is_cooldown: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        let fuel = state.player.fuel;
        Self {
            phase: state.phase,
            game_over_reason: state.game_over_reason,
            bike_x: state.player.bike_x,
            bike_y: config.bike_y(),
            entities: state.entities.clone(),
            trees: state.trees.clone(),
            road_offset: state.scroll.road_offset,
            ground_offset: state.scroll.ground_offset,
            score: state.player.score,
            fuel,
            fuel_fraction: (fuel / config.max_fuel).clamp(0.0, 1.0),
            fuel_level: FuelLevel::from_fuel(fuel, config),
            boost: state.boost.phase(),
            is_boosting: state.is_boosting(),
            is_cooldown: state.is_cooldown(),
        }
    }

    /// Serialize for an out-of-process renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
