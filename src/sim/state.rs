//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in `GameState`, so a restart is
//! simply replacing it with `GameState::new`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::boost::BoostTimer;
use super::timer::Countdown;
use crate::config::GameConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Crash animation playing, simulation frozen
    Crashing,
    /// Run ended
    GameOver,
}

/// Why a run ended.
///
/// `OutOfFuel` is decided by the burn at the start of the frame, so it holds
/// even if a bottle picked up later in that frame refills the tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Collision,
    OutOfFuel,
}

/// What a collidable entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Oncoming car; `sprite` indexes the renderer's car palette
    Car { sprite: u8 },
    /// Fuel bottle pickup
    Fuel,
}

impl EntityKind {
    pub fn is_car(&self) -> bool {
        matches!(self, EntityKind::Car { .. })
    }
}

/// A car or fuel pickup travelling down the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Entity {
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// HSL canopy tint, kept as numbers so the renderer picks its own color type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanopyColor {
    /// Degrees
    pub hue: u16,
    /// Percent
    pub saturation: u8,
    /// Percent
    pub lightness: u8,
}

impl fmt::Display for CanopyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Decorative roadside tree (never collides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub trunk_height: f32,
    pub canopy_height: f32,
    pub canopy_width: f32,
    pub canopy_color: CanopyColor,
}

/// The player's bike and run totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Left edge of the bike, within `[lane_min_x, lane_max_x]`
    pub bike_x: f32,
    /// Within `[0, max_fuel]`
    pub fuel: f32,
    /// Cars dodged
    pub score: u64,
}

/// Background scroll offsets, each within `[0, cycle)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    pub road_offset: f32,
    pub ground_offset: f32,
}

/// Distance travelled since the last successful spawn of each kind
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnDistances {
    pub car: f32,
    pub fuel: f32,
    pub tree: f32,
}

/// Complete mutable state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Set when the run leaves `Running`
    pub game_over_reason: Option<GameOverReason>,
    pub player: PlayerState,
    pub scroll: ScrollState,
    pub spawn: SpawnDistances,
    pub boost: BoostTimer,
    /// Pending `Crashing -> GameOver` transition
    pub crash_delay: Countdown,
    /// Cars and fuel bottles, oldest first
    pub entities: Vec<Entity>,
    /// Roadside decoration, oldest first
    pub trees: Vec<Tree>,
    /// Committed simulation frames this run
    pub frames: u64,
    /// Next entity/tree ID
    next_id: u32,
}

impl GameState {
    /// Fresh run state for the given config (phase `NotStarted`)
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            game_over_reason: None,
            player: PlayerState {
                bike_x: config.bike_start_x(),
                fuel: config.max_fuel,
                score: 0,
            },
            scroll: ScrollState::default(),
            spawn: SpawnDistances::default(),
            boost: BoostTimer::default(),
            crash_delay: Countdown::idle(),
            entities: Vec::new(),
            trees: Vec::new(),
            frames: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Peek at the ID the next spawn will receive
    pub fn peek_entity_id(&self) -> u32 {
        self.next_id
    }

    pub fn is_boosting(&self) -> bool {
        self.boost.is_boosting()
    }

    pub fn is_cooldown(&self) -> bool {
        self.boost.is_cooldown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.fuel, config.max_fuel);
        assert_eq!(state.player.bike_x, config.bike_start_x());
        assert_eq!(state.player.score, 0);
        assert!(state.entities.is_empty());
        assert!(state.trees.is_empty());
        assert!(!state.is_boosting());
        assert!(!state.crash_delay.is_armed());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(&GameConfig::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
        assert_eq!(state.peek_entity_id(), b + 1);
    }

    #[test]
    fn test_canopy_color_display() {
        let color = CanopyColor {
            hue: 120,
            saturation: 55,
            lightness: 40,
        };
        assert_eq!(color.to_string(), "hsl(120, 55%, 40%)");
    }
}
