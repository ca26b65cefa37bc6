//! Game tuning
//!
//! Every gameplay constant lives in `GameConfig` so a host can rebalance the
//! game (or match its screen size) from a JSON document. Missing fields fall
//! back to the defaults in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a `GameConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must lie within [0, 1], got {value}")]
    NotAFraction { field: &'static str, value: f64 },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    #[error("lane width {lane_width} cannot fit a {what} of width {width}")]
    LaneTooNarrow {
        what: &'static str,
        lane_width: f32,
        width: f32,
    },

    #[error("{what} hitbox insets leave no area to collide with")]
    EmptyHitbox { what: &'static str },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-side trim applied to a sprite's bounds to get its hitbox.
///
/// Positive values shrink the box, negative values grow it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Hitbox tuning for each collidable kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hitboxes {
    pub bike: Insets,
    pub car: Insets,
    pub fuel: Insets,
}

impl Default for Hitboxes {
    fn default() -> Self {
        Self {
            bike: Insets::new(5.0, 5.0, 30.0, 30.0),
            // Cars get a slightly wider box than their sprite but a short tail
            car: Insets::new(-10.0, -10.0, 0.0, 70.0),
            fuel: Insets::new(5.0, 5.0, 0.0, 5.0),
        }
    }
}

/// Inclusive-exclusive range used for randomized sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl SizeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in `[0, 1)` onto the range
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }
}

/// All tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen & road ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub road_width_fraction: f32,

    // === Sprites ===
    pub bike_width: f32,
    pub bike_height: f32,
    /// Gap between the bike and the bottom of the viewport
    pub bike_bottom_margin: f32,
    pub car_width: f32,
    pub car_height: f32,
    /// Number of interchangeable car sprites
    pub car_sprite_count: u8,
    pub fuel_width: f32,
    pub fuel_height: f32,
    pub hitboxes: Hitboxes,

    // === Movement ===
    pub base_speed: f32,
    pub boost_speed: f32,
    pub boost_duration_ms: f64,
    pub boost_cooldown_ms: f64,
    pub tilt_sensitivity: f32,
    /// Minimum wall time between committed frames
    pub frame_interval_ms: f64,

    // === Spawning ===
    pub car_spawn_distance: f32,
    pub fuel_spawn_distance: f32,
    /// Chance a due fuel spawn is attempted on a given frame
    pub fuel_spawn_chance: f64,
    /// Cars in this top share of the viewport block their lane
    pub spawn_guard_fraction: f32,

    // === Fuel ===
    pub max_fuel: f32,
    pub fuel_decrease_rate: f32,
    pub boost_fuel_multiplier: f32,
    pub fuel_pickup_amount: f32,
    /// Gauge turns low at or below this share of `max_fuel`
    pub fuel_low_fraction: f32,
    /// Gauge turns critical at or below this share of `max_fuel`
    pub fuel_critical_fraction: f32,

    // === Crash ===
    pub crash_delay_ms: f64,

    // === Background ===
    pub ground_cycle_factor: f32,
    pub ground_scroll_multiplier: f32,
    pub tree_spawn_distance: f32,
    pub tree_scroll_multiplier: f32,
    pub tree_width: SizeRange,
    pub tree_height: SizeRange,
    /// Largest random gap between the road edge and a tree
    pub tree_shoulder_gap: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            road_width_fraction: ROAD_WIDTH_FRACTION,

            bike_width: BIKE_WIDTH,
            bike_height: BIKE_HEIGHT,
            bike_bottom_margin: BIKE_BOTTOM_MARGIN,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            car_sprite_count: CAR_SPRITE_COUNT,
            fuel_width: FUEL_WIDTH,
            fuel_height: FUEL_HEIGHT,
            hitboxes: Hitboxes::default(),

            base_speed: BASE_SPEED,
            boost_speed: BOOST_SPEED,
            boost_duration_ms: BOOST_DURATION_MS,
            boost_cooldown_ms: BOOST_COOLDOWN_MS,
            tilt_sensitivity: TILT_SENSITIVITY,
            frame_interval_ms: FRAME_INTERVAL_MS,

            car_spawn_distance: CAR_SPAWN_DISTANCE,
            fuel_spawn_distance: FUEL_SPAWN_DISTANCE,
            fuel_spawn_chance: FUEL_SPAWN_CHANCE,
            spawn_guard_fraction: SPAWN_GUARD_FRACTION,

            max_fuel: MAX_FUEL,
            fuel_decrease_rate: FUEL_DECREASE_RATE,
            boost_fuel_multiplier: BOOST_FUEL_MULTIPLIER,
            fuel_pickup_amount: FUEL_PICKUP_AMOUNT,
            fuel_low_fraction: FUEL_LOW_FRACTION,
            fuel_critical_fraction: FUEL_CRITICAL_FRACTION,

            crash_delay_ms: CRASH_DELAY_MS,

            ground_cycle_factor: GROUND_CYCLE_FACTOR,
            ground_scroll_multiplier: GROUND_SCROLL_MULTIPLIER,
            tree_spawn_distance: TREE_SPAWN_DISTANCE,
            tree_scroll_multiplier: TREE_SCROLL_MULTIPLIER,
            tree_width: SizeRange::new(MIN_TREE_WIDTH, MAX_TREE_WIDTH),
            tree_height: SizeRange::new(MIN_TREE_HEIGHT, MAX_TREE_HEIGHT),
            tree_shoulder_gap: TREE_SHOULDER_GAP,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn road_width(&self) -> f32 {
        self.viewport_width * self.road_width_fraction
    }

    pub fn road_start_x(&self) -> f32 {
        (self.viewport_width - self.road_width()) / 2.0
    }

    pub fn lane_width(&self) -> f32 {
        self.road_width() / 2.0
    }

    /// X coordinate separating the left lane from the right lane
    pub fn road_midline(&self) -> f32 {
        self.road_start_x() + self.lane_width()
    }

    /// Leftmost bike X
    pub fn lane_min_x(&self) -> f32 {
        self.road_start_x()
    }

    /// Rightmost bike X (the bike's left edge, so its body stays on the road)
    pub fn lane_max_x(&self) -> f32 {
        self.road_start_x() + self.road_width() - self.bike_width
    }

    /// Bike X at the start of a run (centered)
    pub fn bike_start_x(&self) -> f32 {
        self.viewport_width / 2.0 - self.bike_width / 2.0
    }

    /// Fixed top edge of the bike sprite
    pub fn bike_y(&self) -> f32 {
        self.viewport_height - self.bike_height - self.bike_bottom_margin
    }

    pub fn road_cycle(&self) -> f32 {
        self.viewport_height
    }

    pub fn ground_cycle(&self) -> f32 {
        self.viewport_height * self.ground_cycle_factor
    }

    /// Y below which a car no longer blocks its lane for spawning
    pub fn spawn_guard_y(&self) -> f32 {
        self.viewport_height * self.spawn_guard_fraction
    }

    /// Check every field for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("road_width_fraction", self.road_width_fraction),
            ("bike_width", self.bike_width),
            ("bike_height", self.bike_height),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("fuel_width", self.fuel_width),
            ("fuel_height", self.fuel_height),
            ("base_speed", self.base_speed),
            ("boost_speed", self.boost_speed),
            ("car_spawn_distance", self.car_spawn_distance),
            ("fuel_spawn_distance", self.fuel_spawn_distance),
            ("max_fuel", self.max_fuel),
            ("ground_cycle_factor", self.ground_cycle_factor),
            ("tree_spawn_distance", self.tree_spawn_distance),
            // Layers that never move would never drop their trees
            ("ground_scroll_multiplier", self.ground_scroll_multiplier),
            ("tree_scroll_multiplier", self.tree_scroll_multiplier),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }

        let positive_ms = [
            ("frame_interval_ms", self.frame_interval_ms),
            ("boost_duration_ms", self.boost_duration_ms),
            ("boost_cooldown_ms", self.boost_cooldown_ms),
        ];
        for (field, value) in positive_ms {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.car_sprite_count == 0 {
            return Err(ConfigError::NotPositive {
                field: "car_sprite_count",
                value: 0.0,
            });
        }

        let finite = [
            ("bike_bottom_margin", self.bike_bottom_margin),
            ("tilt_sensitivity", self.tilt_sensitivity),
            ("fuel_decrease_rate", self.fuel_decrease_rate),
            ("boost_fuel_multiplier", self.boost_fuel_multiplier),
            ("fuel_pickup_amount", self.fuel_pickup_amount),
            ("tree_shoulder_gap", self.tree_shoulder_gap),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite {
                    field,
                    value: value as f64,
                });
            }
        }
        if !self.crash_delay_ms.is_finite() || self.crash_delay_ms < 0.0 {
            return Err(ConfigError::NotFinite {
                field: "crash_delay_ms",
                value: self.crash_delay_ms,
            });
        }

        if !(0.0..=1.0).contains(&self.fuel_spawn_chance) {
            return Err(ConfigError::NotAFraction {
                field: "fuel_spawn_chance",
                value: self.fuel_spawn_chance,
            });
        }
        if !(self.road_width_fraction <= 1.0) {
            return Err(ConfigError::NotAFraction {
                field: "road_width_fraction",
                value: self.road_width_fraction as f64,
            });
        }
        for (field, value) in [
            ("spawn_guard_fraction", self.spawn_guard_fraction),
            ("fuel_low_fraction", self.fuel_low_fraction),
            ("fuel_critical_fraction", self.fuel_critical_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAFraction {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.fuel_critical_fraction > self.fuel_low_fraction {
            return Err(ConfigError::InvertedRange {
                field: "fuel gauge bands",
                min: self.fuel_critical_fraction,
                max: self.fuel_low_fraction,
            });
        }

        for (field, range) in [
            ("tree_width", self.tree_width),
            ("tree_height", self.tree_height),
        ] {
            if !(range.min.is_finite() && range.max.is_finite() && range.min > 0.0) {
                return Err(ConfigError::NotPositive {
                    field,
                    value: range.min as f64,
                });
            }
            if range.min > range.max {
                return Err(ConfigError::InvertedRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        let lane_width = self.lane_width();
        for (what, width) in [("car", self.car_width), ("fuel bottle", self.fuel_width)] {
            if width > lane_width {
                return Err(ConfigError::LaneTooNarrow {
                    what,
                    lane_width,
                    width,
                });
            }
        }
        if self.bike_width > self.road_width() {
            return Err(ConfigError::LaneTooNarrow {
                what: "bike",
                lane_width: self.road_width(),
                width: self.bike_width,
            });
        }

        let hitboxes = [
            ("bike", self.hitboxes.bike, self.bike_width, self.bike_height),
            ("car", self.hitboxes.car, self.car_width, self.car_height),
            ("fuel", self.hitboxes.fuel, self.fuel_width, self.fuel_height),
        ];
        for (what, insets, width, height) in hitboxes {
            let w = width - insets.left - insets.right;
            let h = height - insets.top - insets.bottom;
            if !(w > 0.0 && h > 0.0) {
                return Err(ConfigError::EmptyHitbox { what });
            }
        }

        Ok(())
    }
}
