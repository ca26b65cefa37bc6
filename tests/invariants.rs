//! Property tests: arbitrary input streams never break the game's invariants

use lane_racer::sim::GamePhase;
use lane_racer::{Advance, Game, GameConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Input {
    /// Display callback this many ms after the previous one (may go backwards)
    Frame(f64),
    BadTimestamp,
    Tilt(f32),
    BadTilt,
    Tap,
    Pause,
    Resume,
    Restart,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        8 => (-20.0f64..120.0).prop_map(Input::Frame),
        1 => Just(Input::BadTimestamp),
        4 => (-2.0f32..2.0).prop_map(Input::Tilt),
        1 => Just(Input::BadTilt),
        2 => Just(Input::Tap),
        1 => Just(Input::Pause),
        1 => Just(Input::Resume),
        1 => Just(Input::Restart),
    ]
}

fn check_invariants(game: &Game) {
    let config = game.config();
    let state = game.state();

    assert!(
        (0.0..=config.max_fuel).contains(&state.player.fuel),
        "fuel {} out of range",
        state.player.fuel
    );
    assert!(
        (config.lane_min_x()..=config.lane_max_x()).contains(&state.player.bike_x),
        "bike_x {} outside lanes",
        state.player.bike_x
    );
    assert!((0.0..config.road_cycle()).contains(&state.scroll.road_offset));
    assert!((0.0..config.ground_cycle()).contains(&state.scroll.ground_offset));
    assert!(!(state.is_boosting() && state.is_cooldown()));

    let mut ids: Vec<u32> = state.entities.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), state.entities.len(), "duplicate entity IDs");

    match state.phase {
        GamePhase::Crashing | GamePhase::GameOver => assert!(state.game_over_reason.is_some()),
        _ => assert!(state.game_over_reason.is_none()),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_inputs_keep_invariants(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input(), 1..400),
    ) {
        let mut game = Game::new(GameConfig::default(), seed).expect("default config is valid");
        game.start();

        let mut now = 0.0f64;
        let mut score = 0u64;
        for input in inputs {
            match input {
                Input::Frame(dt) => {
                    now += dt;
                    let outcome = game.advance(now);
                    if outcome == Advance::Committed {
                        prop_assert!(matches!(
                            game.phase(),
                            GamePhase::Running | GamePhase::Crashing
                        ));
                    }
                }
                Input::BadTimestamp => {
                    let before = game.state().clone();
                    game.advance(f64::NAN);
                    prop_assert_eq!(game.state(), &before);
                }
                Input::Tilt(x) => {
                    game.on_tilt_sample(x);
                }
                Input::BadTilt => {
                    prop_assert!(!game.on_tilt_sample(f32::NAN));
                }
                Input::Tap => {
                    game.on_boost_tap();
                }
                Input::Pause => game.pause(),
                Input::Resume => game.resume(),
                Input::Restart => {
                    game.restart();
                    score = 0;
                }
            }

            check_invariants(&game);
            prop_assert!(game.state().player.score >= score, "score went down");
            score = game.state().player.score;
        }
    }

    #[test]
    fn same_seed_same_run(seed in any::<u64>(), frames in 1usize..600) {
        let mut a = Game::new(GameConfig::default(), seed).expect("valid");
        let mut b = Game::new(GameConfig::default(), seed).expect("valid");
        a.start();
        b.start();
        for i in 0..frames {
            let t = i as f64 * (1000.0 / 60.0);
            a.advance(t);
            b.advance(t);
        }
        prop_assert_eq!(a.state(), b.state());
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }
}
