//! Tilt steering
//!
//! The tilt sensor fires much faster than the simulation (every ~8ms) and
//! may live on another thread, so the bike's target X is kept in an atomic
//! that sensor callbacks update with compare-and-swap. A frame reads it once,
//! which always yields a whole value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::GameConfig;

/// Maps tilt samples to a clamped bike X
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub sensitivity: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl Steering {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            sensitivity: config.tilt_sensitivity,
            min_x: config.lane_min_x(),
            max_x: config.lane_max_x(),
        }
    }

    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.min_x;
        }
        x.clamp(self.min_x, self.max_x)
    }

    /// New X after one tilt sample, or `None` for a malformed sample.
    ///
    /// Tilting toward positive X moves the bike toward negative X.
    pub fn apply(&self, current_x: f32, tilt: f32) -> Option<f32> {
        if !tilt.is_finite() {
            return None;
        }
        Some(self.clamp(current_x - tilt * self.sensitivity))
    }
}

#[derive(Debug)]
struct Shared {
    x_bits: AtomicU32,
    live: AtomicBool,
}

/// Cloneable handle to the bike's target X.
///
/// Give a clone to the sensor callback; the game keeps its own.
#[derive(Debug, Clone)]
pub struct SteeringHandle {
    steering: Steering,
    shared: Arc<Shared>,
}

impl SteeringHandle {
    pub fn new(steering: Steering, start_x: f32) -> Self {
        Self {
            steering,
            shared: Arc::new(Shared {
                x_bits: AtomicU32::new(steering.clamp(start_x).to_bits()),
                live: AtomicBool::new(false),
            }),
        }
    }

    /// Integrate one tilt sample. Returns false if the sample was dropped
    /// (steering not live, or the sample is not a finite number).
    pub fn on_tilt_sample(&self, tilt: f32) -> bool {
        if !self.is_live() {
            return false;
        }
        if !tilt.is_finite() {
            log::debug!("Ignoring malformed tilt sample {tilt}");
            return false;
        }
        self.shared
            .x_bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                self.steering
                    .apply(f32::from_bits(bits), tilt)
                    .map(f32::to_bits)
            })
            .is_ok()
    }

    /// Latest target X
    pub fn current_x(&self) -> f32 {
        f32::from_bits(self.shared.x_bits.load(Ordering::Acquire))
    }

    pub fn is_live(&self) -> bool {
        self.shared.live.load(Ordering::Acquire)
    }

    /// Accept or drop incoming samples
    pub(crate) fn set_live(&self, live: bool) {
        self.shared.live.store(live, Ordering::Release);
    }

    pub(crate) fn reset(&self, x: f32) {
        self.shared
            .x_bits
            .store(self.steering.clamp(x).to_bits(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steering() -> Steering {
        Steering {
            sensitivity: 18.0,
            min_x: 30.0,
            max_x: 330.0,
        }
    }

    #[test]
    fn test_tilt_is_sign_inverted() {
        let s = steering();
        assert_eq!(s.apply(180.0, 1.0), Some(162.0));
        assert_eq!(s.apply(180.0, -0.5), Some(189.0));
    }

    #[test]
    fn test_clamps_to_lanes() {
        let s = steering();
        assert_eq!(s.apply(40.0, 5.0), Some(30.0));
        assert_eq!(s.apply(320.0, -5.0), Some(330.0));
    }

    #[test]
    fn test_nan_sample_ignored() {
        let s = steering();
        assert_eq!(s.apply(180.0, f32::NAN), None);
        assert_eq!(s.apply(180.0, f32::INFINITY), None);

        let handle = SteeringHandle::new(s, 180.0);
        handle.set_live(true);
        assert!(!handle.on_tilt_sample(f32::NAN));
        assert_eq!(handle.current_x(), 180.0);
    }

    #[test]
    fn test_samples_dropped_when_not_live() {
        let handle = SteeringHandle::new(steering(), 180.0);
        assert!(!handle.on_tilt_sample(1.0));
        assert_eq!(handle.current_x(), 180.0);

        handle.set_live(true);
        assert!(handle.on_tilt_sample(1.0));
        assert_eq!(handle.current_x(), 162.0);
    }

    #[test]
    fn test_concurrent_samples_are_not_lost() {
        let handle = SteeringHandle::new(
            Steering {
                sensitivity: 1.0,
                min_x: -10_000.0,
                max_x: 10_000.0,
            },
            0.0,
        );
        handle.set_live(true);

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let h = handle.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        h.on_tilt_sample(-1.0);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("sensor thread panicked");
        }

        // Every sample moved the bike by exactly +1
        assert_eq!(handle.current_x(), 1000.0);
    }
}
