//! Lane Racer headless driver
//!
//! Runs the simulation against a simulated display clock with the demo
//! autopilot at the controls, then restarts once to show a second run.
//!
//! Usage: `lane-racer [SEED] [CONFIG.json]`

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use lane_racer::sim::GamePhase;
use lane_racer::{Advance, Autopilot, Game, GameConfig};

/// Display refresh interval (240 Hz panel)
const DISPLAY_INTERVAL_MS: f64 = 1000.0 / 240.0;
/// Tilt sensor sample interval
const TILT_INTERVAL_MS: f64 = 8.0;
/// Give up on a run after this much simulated time
const MAX_RUN_MS: f64 = 180_000.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    log::info!("Lane Racer (headless) starting with seed {seed}");
    let mut game = Game::new(config, seed)?;
    let autopilot = Autopilot::default();

    game.start();
    let mut clock_ms = 0.0;
    for run in 1..=2 {
        if run > 1 {
            game.restart();
        }
        clock_ms = drive(&mut game, &autopilot, clock_ms);

        let snapshot = game.snapshot();
        log::info!(
            "Run {run} (seed {}): {:?} ({:?}) score {} fuel {:.1} after {} frames",
            game.seed(),
            snapshot.phase,
            snapshot.game_over_reason,
            snapshot.score,
            snapshot.fuel,
            game.state().frames
        );
        log::debug!("Final snapshot: {}", snapshot.to_json()?);
    }
    game.stop();

    Ok(())
}

/// Feed display callbacks and sensor samples until the run ends or times
/// out. Returns the clock at the end of the run.
fn drive(game: &mut Game, autopilot: &Autopilot, start_ms: f64) -> f64 {
    let steering = game.steering_handle();
    let mut now = start_ms;
    let mut next_tilt = start_ms;

    while now - start_ms < MAX_RUN_MS {
        if now >= next_tilt {
            let decision = autopilot.decide(&game.snapshot(), steering.current_x(), game.config());
            // Sensor callbacks may come from another thread; the handle is all they need
            steering.on_tilt_sample(decision.tilt);
            if decision.boost {
                game.on_boost_tap();
            }
            next_tilt += TILT_INTERVAL_MS;
        }

        let outcome = game.advance(now);
        now += DISPLAY_INTERVAL_MS;
        if !outcome.requests_next_frame() {
            break;
        }
        if outcome == Advance::Committed && game.state().frames % 600 == 0 {
            log::info!(
                "Frame {}: score {}, fuel {:.1}",
                game.state().frames,
                game.state().player.score,
                game.state().player.fuel
            );
        }
    }

    if game.phase() == GamePhase::Running {
        log::info!("Time limit reached");
    }
    now
}
