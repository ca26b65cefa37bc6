//! Demo autopilot
//!
//! Plays the game from render snapshots the same way a person would: by
//! producing tilt samples and boost taps. Used by the headless driver and
//! handy for soak-testing the simulation.

use crate::config::GameConfig;
use crate::sim::{BoostPhase, EntityKind, FuelLevel, GamePhase, Lane, Snapshot};

/// One round of autopilot input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotDecision {
    /// Tilt sample to feed the steering, in [-1, 1]
    pub tilt: f32,
    /// Tap the boost button
    pub boost: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// A lane with this much free road ahead of the bike is safe
    pub look_ahead: f32,
    /// Free road needed before boosting
    pub boost_look_ahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            look_ahead: 260.0,
            boost_look_ahead: 520.0,
        }
    }
}

impl Autopilot {
    /// Decide the next input.
    ///
    /// `bike_x` is the live steering target, which runs ahead of the
    /// snapshot between committed frames.
    pub fn decide(&self, snapshot: &Snapshot, bike_x: f32, config: &GameConfig) -> AutopilotDecision {
        if snapshot.phase != GamePhase::Running {
            return AutopilotDecision {
                tilt: 0.0,
                boost: false,
            };
        }

        let clearance = [
            lane_clearance(snapshot, Lane::Left, config),
            lane_clearance(snapshot, Lane::Right, config),
        ];
        let current = Lane::of(bike_x + config.bike_width * 0.5, config);
        let current_clear = clearance[current.index()];

        // Stay put while safe, otherwise take the lane with more room
        let safe_lane = if current_clear >= self.look_ahead {
            current
        } else if clearance[Lane::Left.index()] >= clearance[Lane::Right.index()] {
            Lane::Left
        } else {
            Lane::Right
        };

        // Low on fuel: go for the nearest reachable bottle
        let fuel_target = if snapshot.fuel_level != FuelLevel::Healthy {
            snapshot
                .entities
                .iter()
                .filter(|e| matches!(e.kind, EntityKind::Fuel))
                .filter(|e| e.y + e.height > 0.0 && e.y < snapshot.bike_y)
                .filter(|e| {
                    let lane = Lane::of(e.center_x(), config);
                    // Only if no car sits between us and the bottle
                    clearance[lane.index()] >= snapshot.bike_y - e.y
                })
                .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
                .map(|e| e.center_x() - config.bike_width * 0.5)
        } else {
            None
        };

        let target_x = fuel_target.unwrap_or_else(|| lane_center_x(safe_lane, config));
        let target_x = target_x.clamp(config.lane_min_x(), config.lane_max_x());

        // Steering moves the bike by -tilt * sensitivity
        let tilt = (-(target_x - bike_x) / config.tilt_sensitivity).clamp(-1.0, 1.0);

        let boost = snapshot.boost == BoostPhase::Idle
            && snapshot.fuel_level == FuelLevel::Healthy
            && current_clear >= self.boost_look_ahead;

        AutopilotDecision { tilt, boost }
    }
}

/// Free road between the bike and the nearest car ahead in `lane`
fn lane_clearance(snapshot: &Snapshot, lane: Lane, config: &GameConfig) -> f32 {
    let bike_bottom = snapshot.bike_y + config.bike_height;
    snapshot
        .entities
        .iter()
        .filter(|e| e.kind.is_car())
        .filter(|e| e.y < bike_bottom)
        .filter(|e| Lane::of(e.center_x(), config) == lane)
        .map(|e| (snapshot.bike_y - (e.y + e.height)).max(0.0))
        .fold(f32::INFINITY, f32::min)
}

/// Bike X that centres the bike in `lane`
fn lane_center_x(lane: Lane, config: &GameConfig) -> f32 {
    let center = config.road_start_x() + config.lane_width() * (lane.index() as f32 + 0.5);
    center - config.bike_width * 0.5
}
