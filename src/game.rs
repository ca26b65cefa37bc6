//! Game driver
//!
//! Wraps the deterministic `sim` module with everything that depends on wall
//! time and host callbacks:
//! - Lifecycle (`start`, `restart`, `pause`/`resume`, `stop`)
//! - Frame throttling of display-refresh callbacks to the simulation cadence
//! - Boost/cooldown and crash-delay timers
//! - Tilt and tap input

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{ConfigError, GameConfig};
use crate::sim::{
    FrameReport, GameOverReason, GamePhase, GameState, Snapshot, Steering, SteeringHandle, tick,
};

/// What one `advance` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A simulation frame was committed
    Committed,
    /// Too soon (or a clock anomaly); nothing simulated
    Throttled,
    /// Crash animation playing; waiting for the game over transition
    Pending,
    /// Not running (start screen, game over, paused or stopped)
    Halted,
}

impl Advance {
    /// Should the host schedule another display callback?
    pub fn requests_next_frame(self) -> bool {
        !matches!(self, Advance::Halted)
    }
}

/// A game session: one `GameState` plus the machinery that drives it
pub struct Game {
    config: GameConfig,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    steering: SteeringHandle,
    /// Timestamp of the last committed frame
    last_frame_ms: Option<f64>,
    /// Timestamp of the last `advance` call, for draining timers
    last_seen_ms: Option<f64>,
    paused: bool,
    stopped: bool,
    last_report: Option<FrameReport>,
}

impl Game {
    /// Create a session on the start screen
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config);
        let steering = SteeringHandle::new(Steering::from_config(&config), config.bike_start_x());
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            state,
            steering,
            config,
            last_frame_ms: None,
            last_seen_ms: None,
            paused: false,
            stopped: false,
            last_report: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Report of the most recent committed frame this run
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    /// Handle for a sensor callback that runs outside the game's thread
    pub fn steering_handle(&self) -> SteeringHandle {
        self.steering.clone()
    }

    /// Render view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.config)
    }

    /// Running, not paused, not stopped
    fn is_live(&self) -> bool {
        self.state.phase == GamePhase::Running && !self.paused && !self.stopped
    }

    fn sync_steering(&self) {
        self.steering.set_live(self.is_live());
    }

    /// Leave the start screen. Does nothing in any other phase.
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::NotStarted || self.stopped {
            return;
        }
        self.state.phase = GamePhase::Running;
        self.last_frame_ms = None;
        self.last_seen_ms = None;
        self.sync_steering();
        log::info!("Run started (seed {})", self.seed);
    }

    /// Throw away the current run and start a fresh one
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.config);
        self.state.phase = GamePhase::Running;
        self.steering.reset(self.config.bike_start_x());
        self.last_frame_ms = None;
        self.last_seen_ms = None;
        self.paused = false;
        self.stopped = false;
        self.last_report = None;
        self.sync_steering();
        log::info!("Run restarted");
    }

    /// Freeze simulation and timers
    pub fn pause(&mut self) {
        if self.paused || self.stopped {
            return;
        }
        self.paused = true;
        self.sync_steering();
        log::info!("Paused");
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        // The paused gap is not simulated
        self.last_frame_ms = None;
        self.last_seen_ms = None;
        self.sync_steering();
        log::info!("Resumed");
    }

    /// Halt the loop and cancel every timer. Only `restart` runs it again.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.state.boost.reset();
        self.state.crash_delay.cancel();
        self.sync_steering();
        log::info!("Stopped");
    }

    /// Feed one tilt sample (ignored unless the run is live)
    pub fn on_tilt_sample(&self, x: f32) -> bool {
        self.steering.on_tilt_sample(x)
    }

    /// Request a boost. Returns whether boosting started.
    pub fn on_boost_tap(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let engaged = self.state.boost.engage(self.config.boost_duration_ms);
        if engaged {
            log::debug!("Boost engaged");
        }
        engaged
    }

    /// Display-refresh callback.
    ///
    /// Timers are drained on every call; a simulation frame is committed only
    /// when at least one frame interval has passed since the last one.
    pub fn advance(&mut self, timestamp_ms: f64) -> Advance {
        if self.stopped || self.paused {
            return Advance::Halted;
        }
        if !timestamp_ms.is_finite() {
            log::debug!("Ignoring non-finite timestamp {timestamp_ms}");
            return self.waiting();
        }

        let elapsed = self.observe_clock(timestamp_ms);
        self.state
            .boost
            .advance(elapsed, self.config.boost_cooldown_ms);
        if self.state.crash_delay.advance(elapsed).is_some() {
            self.finish_crash();
        }

        if self.state.phase != GamePhase::Running {
            return self.waiting();
        }

        if let Some(last) = self.last_frame_ms {
            let delta = timestamp_ms - last;
            if delta < 0.0 {
                // Clock went backwards: re-anchor and skip
                self.last_frame_ms = Some(timestamp_ms);
                return Advance::Throttled;
            }
            if delta < self.config.frame_interval_ms {
                log::trace!("Throttled ({delta:.2}ms since last frame)");
                return Advance::Throttled;
            }
        }
        self.last_frame_ms = Some(timestamp_ms);
        self.commit_frame();
        Advance::Committed
    }

    /// Outcome for a call that did not simulate
    fn waiting(&self) -> Advance {
        match self.state.phase {
            GamePhase::Running => Advance::Throttled,
            GamePhase::Crashing => Advance::Pending,
            GamePhase::NotStarted | GamePhase::GameOver => Advance::Halted,
        }
    }

    /// Wall time since the previous call; zero on the first call or when the
    /// clock went backwards
    fn observe_clock(&mut self, timestamp_ms: f64) -> f64 {
        let elapsed = match self.last_seen_ms {
            Some(prev) if timestamp_ms >= prev => timestamp_ms - prev,
            Some(prev) => {
                log::debug!("Clock went backwards ({prev} -> {timestamp_ms})");
                0.0
            }
            None => 0.0,
        };
        self.last_seen_ms = Some(timestamp_ms);
        elapsed
    }

    fn commit_frame(&mut self) {
        self.state.player.bike_x = self.steering.current_x();
        let report = tick(&mut self.state, &self.config, &mut self.rng);
        if report.dodged > 0 {
            log::debug!("Dodged {} car(s), score {}", report.dodged, self.state.player.score);
        }
        if let Some(reason) = report.crash {
            self.begin_crash(reason);
        }
        self.last_report = Some(report);
    }

    fn begin_crash(&mut self, reason: GameOverReason) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.phase = GamePhase::Crashing;
        self.state.game_over_reason = Some(reason);
        self.state.boost.reset();
        self.state.crash_delay.arm(self.config.crash_delay_ms);
        self.sync_steering();
        log::info!(
            "Crashed ({:?}) after {} frames, score {}",
            reason,
            self.state.frames,
            self.state.player.score
        );
    }

    fn finish_crash(&mut self) {
        if self.state.phase != GamePhase::Crashing {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", self.state.player.score);
    }
}
