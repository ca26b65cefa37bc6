//! Lane Racer - a tilt-steered two-lane bike racing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, fuel, collisions)
//! - `game`: Lifecycle, frame throttling and input entry points around `sim`
//! - `config`: Data-driven game tuning
//! - `autopilot`: Demo AI that plays the game from render snapshots

pub mod autopilot;
pub mod config;
pub mod game;
pub mod sim;

pub use autopilot::{Autopilot, AutopilotDecision};
pub use config::{ConfigError, GameConfig};
pub use game::{Advance, Game};

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Target simulation cadence (60 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;
    /// Share of the viewport width covered by the road
    pub const ROAD_WIDTH_FRACTION: f32 = 0.85;

    /// Player bike
    pub const BIKE_WIDTH: f32 = 40.0;
    pub const BIKE_HEIGHT: f32 = 80.0;
    pub const BIKE_BOTTOM_MARGIN: f32 = 20.0;

    /// Traffic and pickups
    pub const CAR_WIDTH: f32 = 80.0;
    pub const CAR_HEIGHT: f32 = 150.0;
    pub const CAR_SPRITE_COUNT: u8 = 7;
    pub const FUEL_WIDTH: f32 = 30.0;
    pub const FUEL_HEIGHT: f32 = 40.0;

    /// Speeds (units per committed frame)
    pub const BASE_SPEED: f32 = 15.0;
    pub const BOOST_SPEED: f32 = 25.0;
    pub const BOOST_DURATION_MS: f64 = 2000.0;
    pub const BOOST_COOLDOWN_MS: f64 = 5000.0;

    /// Tilt units to horizontal units (sign inverted when applied)
    pub const TILT_SENSITIVITY: f32 = 18.0;

    /// Distance travelled between spawn attempts
    pub const CAR_SPAWN_DISTANCE: f32 = 350.0;
    pub const FUEL_SPAWN_DISTANCE: f32 = 1500.0;
    pub const FUEL_SPAWN_CHANCE: f64 = 0.5;
    /// Cars above this share of the viewport block their lane for spawning
    pub const SPAWN_GUARD_FRACTION: f32 = 0.15;

    /// Fuel economy
    pub const MAX_FUEL: f32 = 100.0;
    pub const FUEL_DECREASE_RATE: f32 = 0.15;
    pub const BOOST_FUEL_MULTIPLIER: f32 = 2.5;
    pub const FUEL_PICKUP_AMOUNT: f32 = 30.0;
    /// Gauge bands as shares of a full tank (above low is healthy)
    pub const FUEL_LOW_FRACTION: f32 = 0.3;
    pub const FUEL_CRITICAL_FRACTION: f32 = 0.1;

    /// Delay between a crash and the game over screen
    pub const CRASH_DELAY_MS: f64 = 700.0;

    /// Ground layer scrolls slower and over a longer cycle than the road
    pub const GROUND_CYCLE_FACTOR: f32 = 1.5;
    pub const GROUND_SCROLL_MULTIPLIER: f32 = 0.5;

    /// Roadside trees
    pub const TREE_SPAWN_DISTANCE: f32 = 100.0;
    pub const TREE_SCROLL_MULTIPLIER: f32 = 1.2;
    pub const MIN_TREE_WIDTH: f32 = 30.0;
    pub const MAX_TREE_WIDTH: f32 = 80.0;
    pub const MIN_TREE_HEIGHT: f32 = 80.0;
    pub const MAX_TREE_HEIGHT: f32 = 150.0;
    pub const TREE_SHOULDER_GAP: f32 = 50.0;
}

/// Wrap a scroll offset into `[0, cycle)`
#[inline]
pub fn wrap_offset(offset: f32, cycle: f32) -> f32 {
    let wrapped = offset.rem_euclid(cycle);
    // rem_euclid can round up to `cycle` for tiny negative inputs
    if wrapped >= cycle { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_offset() {
        assert_eq!(wrap_offset(14.0, 1000.0), 14.0);
        assert_eq!(wrap_offset(1014.0, 1000.0), 14.0);
        assert_eq!(wrap_offset(1000.0, 1000.0), 0.0);
        assert!(wrap_offset(-1.0e-9, 1000.0) < 1000.0);
    }
}
