//! Boost / cooldown sub-state machine
//!
//! `Idle --tap--> Boosting --duration--> Cooldown --cooldown--> Idle`

use serde::{Deserialize, Serialize};

use super::timer::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoostPhase {
    #[default]
    Idle,
    Boosting,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoostTimer {
    phase: BoostPhase,
    timer: Countdown,
}

impl BoostTimer {
    pub fn phase(&self) -> BoostPhase {
        self.phase
    }

    pub fn is_boosting(&self) -> bool {
        self.phase == BoostPhase::Boosting
    }

    pub fn is_cooldown(&self) -> bool {
        self.phase == BoostPhase::Cooldown
    }

    /// Start boosting. Only possible from `Idle`; returns whether it engaged.
    pub fn engage(&mut self, duration_ms: f64) -> bool {
        if self.phase != BoostPhase::Idle {
            return false;
        }
        self.phase = BoostPhase::Boosting;
        self.timer.arm(duration_ms);
        true
    }

    /// Drain elapsed time, stepping through expired phases.
    ///
    /// A long gap can expire both the boost and the cooldown in one call;
    /// time left over from one phase carries into the next.
    pub fn advance(&mut self, elapsed_ms: f64, cooldown_ms: f64) {
        let mut elapsed = elapsed_ms;
        while let Some(overshoot) = self.timer.advance(elapsed) {
            match self.phase {
                BoostPhase::Boosting => {
                    log::debug!("Boost over, cooling down");
                    self.phase = BoostPhase::Cooldown;
                    self.timer.arm(cooldown_ms);
                }
                BoostPhase::Cooldown => {
                    log::debug!("Boost ready");
                    self.phase = BoostPhase::Idle;
                }
                BoostPhase::Idle => {}
            }
            elapsed = overshoot;
        }
    }

    /// Back to `Idle` with any pending expiry cancelled
    pub fn reset(&mut self) {
        self.phase = BoostPhase::Idle;
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut boost = BoostTimer::default();
        assert!(boost.engage(2000.0));
        assert!(boost.is_boosting());

        boost.advance(1999.0, 5000.0);
        assert!(boost.is_boosting());

        boost.advance(1.0, 5000.0);
        assert!(boost.is_cooldown());

        boost.advance(4999.0, 5000.0);
        assert!(boost.is_cooldown());

        boost.advance(1.0, 5000.0);
        assert_eq!(boost.phase(), BoostPhase::Idle);
    }

    #[test]
    fn test_tap_while_boosting_is_ignored() {
        let mut boost = BoostTimer::default();
        assert!(boost.engage(2000.0));
        boost.advance(1500.0, 5000.0);
        let before = boost;

        assert!(!boost.engage(2000.0));
        // Timer not restarted
        assert_eq!(boost, before);
        boost.advance(500.0, 5000.0);
        assert!(boost.is_cooldown());
    }

    #[test]
    fn test_tap_during_cooldown_is_ignored() {
        let mut boost = BoostTimer::default();
        boost.engage(2000.0);
        boost.advance(2500.0, 5000.0);
        assert!(boost.is_cooldown());
        assert!(!boost.engage(2000.0));
        assert!(boost.is_cooldown());
    }

    #[test]
    fn test_overshoot_carries_into_cooldown() {
        let mut boost = BoostTimer::default();
        boost.engage(2000.0);
        // Lands 1000ms into cooldown
        boost.advance(3000.0, 5000.0);
        assert!(boost.is_cooldown());
        boost.advance(3999.0, 5000.0);
        assert!(boost.is_cooldown());
        boost.advance(1.0, 5000.0);
        assert_eq!(boost.phase(), BoostPhase::Idle);
    }

    #[test]
    fn test_long_gap_returns_to_idle() {
        let mut boost = BoostTimer::default();
        boost.engage(2000.0);
        boost.advance(60_000.0, 5000.0);
        assert_eq!(boost.phase(), BoostPhase::Idle);
    }

    #[test]
    fn test_reset_cancels_pending_expiry() {
        let mut boost = BoostTimer::default();
        boost.engage(2000.0);
        boost.reset();
        assert_eq!(boost, BoostTimer::default());
        boost.advance(10_000.0, 5000.0);
        assert_eq!(boost.phase(), BoostPhase::Idle);
    }
}
