//! Cancellable one-shot countdowns
//!
//! Delayed transitions (boost expiry, cooldown expiry, crash delay) are
//! modelled as countdowns drained by elapsed wall time on each `advance`
//! call rather than as scheduled callbacks. Cancelling is just clearing the
//! remaining time, so a cancelled countdown can never fire into a reset state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: Option<f64>,
}

impl Countdown {
    /// A countdown that is not running
    pub const fn idle() -> Self {
        Self { remaining_ms: None }
    }

    /// Start (or restart) the countdown
    pub fn arm(&mut self, duration_ms: f64) {
        self.remaining_ms = Some(duration_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Drain `elapsed_ms` from the countdown.
    ///
    /// Returns `Some(overshoot)` exactly once, on the call that reaches zero;
    /// the overshoot is how far past the deadline this call went. Non-positive
    /// or non-finite elapsed time never fires anything.
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<f64> {
        let remaining = self.remaining_ms?;
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return None;
        }
        let left = remaining - elapsed_ms;
        if left <= 0.0 {
            self.remaining_ms = None;
            Some(-left)
        } else {
            self.remaining_ms = Some(left);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_with_overshoot() {
        let mut timer = Countdown::idle();
        timer.arm(100.0);
        assert_eq!(timer.advance(60.0), None);
        assert_eq!(timer.advance(50.0), Some(10.0));
        assert!(!timer.is_armed());
        // Already fired
        assert_eq!(timer.advance(500.0), None);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = Countdown::idle();
        timer.arm(100.0);
        timer.cancel();
        assert_eq!(timer.advance(1000.0), None);
    }

    #[test]
    fn test_ignores_bad_elapsed() {
        let mut timer = Countdown::idle();
        timer.arm(100.0);
        assert_eq!(timer.advance(-50.0), None);
        assert_eq!(timer.advance(f64::NAN), None);
        // Nothing was drained
        assert_eq!(timer.advance(99.0), None);
        assert_eq!(timer.advance(1.0), Some(0.0));
    }

    #[test]
    fn test_zero_duration_fires_on_next_advance() {
        let mut timer = Countdown::idle();
        timer.arm(0.0);
        assert_eq!(timer.advance(0.0), Some(0.0));
    }
}
