//! Environment contract tests.
//!
//! These cover the reset/step/action_mask surface:
//! - Deterministic reset
//! - Mask and enumeration agreement
//! - Invalid index handling
//! - Hot-seat play and forced endings

use rust_dominion::core::{Choice, EngineError, EnvConfig, OpponentKind, Phase, PlayerId};
use rust_dominion::env::{DominionEnv, EndReason};
use rust_dominion::eval::run_episode;
use rust_dominion::policy::BigMoney;

fn env(config: EnvConfig) -> DominionEnv {
    DominionEnv::new(config).expect("valid config")
}

/// Resetting twice with the same seed yields identical observations.
#[test]
fn test_reset_is_idempotent() {
    let mut a = env(EnvConfig::default());
    let (first, _) = a.reset(Some(1234)).unwrap();
    a.step(0).unwrap();
    let (second, _) = a.reset(Some(1234)).unwrap();
    assert_eq!(first, second);

    let mut b = env(EnvConfig::default());
    let (third, _) = b.reset(Some(1234)).unwrap();
    assert_eq!(first, third);
}

/// `reset(None)` moves on to a new seed each episode.
#[test]
fn test_reset_without_seed_advances() {
    let mut e = env(EnvConfig::default());
    e.reset(Some(10)).unwrap();
    e.reset(None).unwrap();
    assert_eq!(e.seed(), 11);
    e.reset(None).unwrap();
    assert_eq!(e.seed(), 12);
}

/// Mask bit `i` is set exactly when slot `i` holds an available option.
#[test]
fn test_mask_matches_choices() {
    let mut e = env(EnvConfig::default());
    e.reset(Some(5)).unwrap();

    for _ in 0..200 {
        let mask = e.action_mask();
        let choices = e.choices();
        assert_eq!(mask.len(), e.action_space_size());
        assert_eq!(choices.len(), e.action_space_size());
        for (bit, choice) in mask.iter().zip(&choices) {
            assert_eq!(*bit == 1, choice.is_available());
        }
        assert_eq!(mask[0], 1);
        assert_eq!(choices[0], Choice::EndPhase);

        // take the highest legal slot
        let index = mask.iter().rposition(|&b| b == 1).unwrap();
        if e.step(index).unwrap().done() {
            break;
        }
    }
}

/// Masked and out-of-range indices cost the penalty and change nothing.
#[test]
fn test_invalid_index_penalty() {
    let mut e = env(EnvConfig::default());
    let (obs, _) = e.reset(Some(2)).unwrap();
    let masked = e.action_mask().iter().position(|&b| b == 0).unwrap();

    for index in [masked, 28, usize::MAX] {
        let result = e.step(index).unwrap();
        assert!(result.info.invalid_action);
        assert_eq!(result.reward, -50.0);
        assert!(!result.terminated && !result.truncated);
        assert_eq!(result.observation, obs);
    }
}

/// Ending the action phase moves the learner to BUY within the same turn.
#[test]
fn test_end_phase_moves_to_buy() {
    let mut e = env(EnvConfig::default());
    e.reset(Some(3)).unwrap();
    let result = e.step(0).unwrap();
    assert_eq!(result.info.phase, Phase::Buy);
    assert_eq!(result.info.current_player, PlayerId::new(0));
    assert!(result.reward < 0.0);
}

/// With a human opponent both seats are driven through `step`.
#[test]
fn test_human_hot_seat() {
    let config = EnvConfig::default().with_opponent(OpponentKind::Human);
    let mut e = env(config);
    let (_, info) = e.reset(Some(4)).unwrap();
    assert_eq!(info.current_player, PlayerId::new(0));

    e.step(0).unwrap();
    let result = e.step(0).unwrap();
    assert_eq!(result.info.current_player, PlayerId::new(1));
    assert_eq!(result.info.phase, Phase::Action);

    // the second seat's decisions earn the learner nothing
    let result = e.step(0).unwrap();
    assert_eq!(result.reward, 0.0);
    assert_eq!(result.info.current_player, PlayerId::new(1));
}

/// The learner may sit in a later seat; the bot plays first.
#[test]
fn test_learner_in_second_seat() {
    let config = EnvConfig::default().with_learning_player(1);
    let mut e = env(config);
    let (_, info) = e.reset(Some(6)).unwrap();
    assert_eq!(info.current_player, PlayerId::new(1));
    assert_eq!(e.game().state().player(PlayerId::new(0)).turn_number, 1);
}

/// Reaching the turn ceiling truncates with the ceiling penalty.
#[test]
fn test_turn_ceiling_truncates() {
    let config = EnvConfig::default().with_turn_ceiling(3).with_stall_turn(None);
    let mut e = env(config);
    e.reset(Some(7)).unwrap();

    let mut last = None;
    for _ in 0..10 {
        let result = e.step(0).unwrap();
        let done = result.done();
        last = Some(result);
        if done {
            break;
        }
    }
    let last = last.unwrap();
    assert!(last.truncated);
    assert!(!last.terminated);
    assert_eq!(last.reward, -100.0);
    assert_eq!(last.info.end_reason, Some(EndReason::TurnCeiling));
}

/// Never touching the Province pile past the stall turn truncates.
#[test]
fn test_stall_truncates() {
    let config = EnvConfig::default().with_stall_turn(Some(2));
    let mut e = env(config);
    e.reset(Some(8)).unwrap();

    let mut result = e.step(0).unwrap();
    for _ in 0..10 {
        if result.done() {
            break;
        }
        result = e.step(0).unwrap();
    }
    assert!(result.truncated);
    assert_eq!(result.info.end_reason, Some(EndReason::Stalled));
    // learner holds 3 VP; ties count as leading
    assert!(result.reward >= -50.0 + 1.5);
}

/// A skipped turn still counts toward the turn ceiling.
#[test]
fn test_skipped_turn_reaches_ceiling() {
    let config = EnvConfig::default()
        .with_opponent(OpponentKind::Human)
        .with_turn_ceiling(2)
        .with_stall_turn(None);
    let mut e = env(config);
    e.reset(Some(5)).unwrap();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);
    e.game_mut().state_mut().player_mut(p0).skip_turn = true;

    // seat 0 finishes turn 1, seat 1 plays turn 1
    assert!(!e.step(0).unwrap().done());
    assert!(!e.step(0).unwrap().done());
    assert!(!e.step(0).unwrap().done());
    let result = e.step(0).unwrap();

    // seat 0's skipped second turn hits the ceiling before seat 1 moves on
    assert!(result.truncated);
    assert_eq!(result.info.end_reason, Some(EndReason::TurnCeiling));
    let state = e.game().state();
    assert!(!state.player(p0).skip_turn);
    assert_eq!(state.player(p0).turn_number, 2);
    assert_eq!(state.player(p1).turn_number, 1);
}

/// Stepping a finished episode is a no-op with zero reward.
#[test]
fn test_step_after_end_is_noop() {
    let config = EnvConfig::default().with_turn_ceiling(2).with_stall_turn(None);
    let mut e = env(config);
    e.reset(Some(9)).unwrap();
    while !e.step(0).unwrap().done() {}

    let result = e.step(0).unwrap();
    assert!(result.truncated);
    assert_eq!(result.reward, 0.0);
}

/// A big-money learner against the big-money bot plays a full game with
/// every card accounted for.
#[test]
fn test_full_episode_conserves_cards() {
    let mut e = env(EnvConfig::default());
    let summary = run_episode(&mut e, &mut BigMoney::new(), 31).unwrap();
    assert!(summary.terminated || summary.truncated);
    assert_eq!(summary.invalid_steps, 0);
    e.game().state().validate_conservation().unwrap();
    if summary.terminated {
        assert_eq!(summary.end_reason, Some(EndReason::EndCondition));
        assert!(e.game().is_game_over());
    }
}

/// Cloning snapshots the whole episode.
#[test]
fn test_clone_is_independent() {
    let mut e = env(EnvConfig::default());
    e.reset(Some(12)).unwrap();
    let snapshot = e.clone();
    e.step(0).unwrap();
    assert_eq!(snapshot.game().phase(), Phase::Action);
    assert_eq!(e.game().phase(), Phase::Buy);
}

#[test]
fn test_invalid_config_rejected() {
    let config = EnvConfig::default().with_player_count(7);
    assert!(matches!(DominionEnv::new(config), Err(EngineError::InvalidConfig(_))));

    let config = EnvConfig::default().with_kingdom(["Smithy", "Nonexistent"]);
    assert!(matches!(DominionEnv::new(config), Err(EngineError::UnknownCard(_))));
}

/// The mask must be wide enough for the longest option list the kingdom
/// can produce: 2 + 3 treasures + 17 piles for the default kingdom.
#[test]
fn test_narrow_action_space_rejected() {
    let config = EnvConfig::default().with_action_space(10);
    assert!(matches!(DominionEnv::new(config), Err(EngineError::InvalidConfig(_))));

    let config = EnvConfig::default().with_action_space(21);
    assert!(matches!(DominionEnv::new(config), Err(EngineError::InvalidConfig(_))));

    let e = env(EnvConfig::default().with_action_space(22));
    assert_eq!(e.action_space_size(), 22);
}

#[test]
fn test_config_from_json() {
    let config = EnvConfig::from_json(r#"{"player_count": 3, "opponent": "human"}"#).unwrap();
    let e = env(config);
    assert_eq!(e.config().player_count, 3);
    assert_eq!(e.config().opponent, OpponentKind::Human);
    assert_eq!(e.action_space_size(), 28);
}
