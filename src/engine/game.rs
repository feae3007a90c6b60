//! Turn/phase state machine.
//!
//! ## Turn shape
//!
//! ```text
//! NONE --begin_turn--> ACTION --EndPhase--> BUY --EndPhase--> CLEANUP --> NONE
//! ```
//!
//! `begin_turn` starts the current seat's turn. Each `decide` commits one
//! choice; phases only change on an explicit `EndPhase`. Leaving BUY runs
//! the end-of-buy hook and the whole cleanup in the same call, then hands
//! the turn to the next seat (which waits in NONE for `begin_turn`).
//!
//! ## Game end
//!
//! The end condition is checked after every decision, but the game only
//! ends once the triggering turn's cleanup completes. The end-of-game hook
//! then runs once per player.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::applier::{self, ResourceDelta};
use crate::cards::CardId;
use crate::core::action::{Choice, ChoiceRecord};
use crate::core::error::{EngineError, Result};
use crate::core::phase::{Phase, PhaseEvent};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::{GameState, HAND_SIZE};
use crate::options::{self, ChoiceList};
use crate::rules::RulesEngine;
use crate::zones::ZoneKind;

/// Result of `begin_turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStart {
    /// The seat is now in ACTION.
    Started(PlayerId),
    /// The seat's `skip_turn` flag was consumed; the turn passed on.
    Skipped(PlayerId),
}

/// Result of one committed decision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub delta: ResourceDelta,
    /// Phases entered during this call, in order.
    pub entered: SmallVec<[Phase; 3]>,
    /// The acting player's cleanup completed.
    pub turn_ended: bool,
    /// The game ended with this decision.
    pub game_over: bool,
}

/// A completed turn, appended after each cleanup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnMarker {
    pub player: PlayerId,
    pub turn: u32,
}

/// One game driven a decision at a time.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_dominion::cards::{Catalog, CardRegistry};
/// use rust_dominion::core::{Choice, GameState, Phase};
/// use rust_dominion::engine::Game;
/// use rust_dominion::rules::BaseRules;
///
/// let registry = Arc::new(CardRegistry::build(&Catalog::standard(), &["Smithy"]).unwrap());
/// let mut game = Game::new(BaseRules, GameState::new(registry, 2, 42));
/// game.start();
/// game.begin_turn().unwrap();
///
/// game.decide(Choice::EndPhase).unwrap();
/// assert_eq!(game.phase(), Phase::Buy);
/// ```
#[derive(Clone, Debug)]
pub struct Game<R> {
    rules: R,
    state: GameState,
    current: PlayerId,
    end_triggered: bool,
    game_over: bool,
    empty_piles_to_end: usize,
    turns: Vector<TurnMarker>,
    history: Vector<ChoiceRecord>,
}

impl<R: RulesEngine> Game<R> {
    /// Wrap an undealt state. Call [`Game::start`] before playing.
    #[must_use]
    pub fn new(rules: R, state: GameState) -> Self {
        Self {
            rules,
            state,
            current: PlayerId::new(0),
            end_triggered: false,
            game_over: false,
            empty_piles_to_end: 3,
            turns: Vector::new(),
            history: Vector::new(),
        }
    }

    /// Number of empty piles that ends the game.
    #[must_use]
    pub fn with_empty_piles_to_end(mut self, piles: usize) -> Self {
        self.empty_piles_to_end = piles;
        self
    }

    /// Deal starting decks and seat player 0 at a turn boundary.
    pub fn start(&mut self) {
        self.state.deal_starting_decks();
        for (_, ps) in self.state.players.iter_mut() {
            ps.phase = Phase::None;
        }
        self.current = PlayerId::new(0);
        self.end_triggered = false;
        self.game_over = false;
        self.turns = Vector::new();
        self.history = Vector::new();
        debug!(players = self.state.player_count(), "game started");
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state for scenario setup. Bypasses every invariant check
    /// except the conservation check at cleanup.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Phase of the current player.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.player(self.current).phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The end condition has been met; the game ends after this turn.
    #[must_use]
    pub fn end_triggered(&self) -> bool {
        self.end_triggered
    }

    #[must_use]
    pub fn turns(&self) -> &Vector<TurnMarker> {
        &self.turns
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ChoiceRecord> {
        &self.history
    }

    /// Legal options for the current player.
    #[must_use]
    pub fn options(&self) -> ChoiceList {
        options::enumerate(&self.state, self.current, self.phase())
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> i32 {
        self.rules.score(&self.state, player)
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<i32> {
        PlayerMap::new(self.state.player_count(), |p| self.score(p))
    }

    /// The single highest scorer, or `None` on a tie for first.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let scores = self.scores();
        let best = scores.values().copied().max()?;
        let mut leaders = scores.iter().filter(|&(_, &s)| s == best).map(|(p, _)| p);
        match (leaders.next(), leaders.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }

    /// True when the end condition holds for the current supply.
    #[must_use]
    pub fn end_condition_met(&self) -> bool {
        let supply = &self.state.supply;
        supply.is_empty_pile(CardId::PROVINCE) || supply.empty_piles() >= self.empty_piles_to_end
    }

    // === Turn flow ===

    /// Start the current seat's turn.
    ///
    /// Increments the seat's turn counter. A seat with `skip_turn` set
    /// gets no decisions: the flag is cleared and the turn passes to the
    /// next seat, still in NONE.
    pub fn begin_turn(&mut self) -> Result<TurnStart> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        let player = self.current;
        let phase = self.phase();
        if phase != Phase::None {
            return Err(EngineError::IllegalTransition {
                from: phase,
                event: PhaseEvent::StartTurn,
            });
        }

        let ps = self.state.player_mut(player);
        ps.turn_number += 1;
        let turn = ps.turn_number;

        if ps.skip_turn {
            ps.skip_turn = false;
            debug!(%player, turn, "turn skipped");
            self.current = player.next(self.state.player_count());
            return Ok(TurnStart::Skipped(player));
        }

        ps.reset_resources();
        self.transition(player, PhaseEvent::StartTurn)?;
        self.rules.start_of_turn(&mut self.state, player)?;
        trace!(%player, turn, "turn started");
        Ok(TurnStart::Started(player))
    }

    /// Commit one choice for the current player.
    ///
    /// The choice must be one of [`Game::options`]. Invalid choices fail
    /// without changing anything.
    pub fn decide(&mut self, choice: Choice) -> Result<DecisionOutcome> {
        let player = self.current;
        let phase = self.phase();
        if !phase.is_decision_phase() {
            return Err(EngineError::NotMidTurn(phase));
        }
        if !choice.is_available() {
            return Err(EngineError::UnavailableChoice);
        }
        if !self.options().contains(&choice) {
            return Err(EngineError::IllegalChoice(choice.label(self.state.registry())));
        }

        let delta = applier::apply(&self.rules, &mut self.state, player, choice)?;
        let turn = self.state.player(player).turn_number;

        if !self.end_triggered && self.end_condition_met() {
            self.end_triggered = true;
            info!(%player, turn, "end condition met; finishing turn");
        }

        let mut outcome = DecisionOutcome {
            delta,
            ..DecisionOutcome::default()
        };
        if choice.is_end_phase() {
            self.end_phase(player, &mut outcome)?;
        }

        self.history.push_back(ChoiceRecord::new(player, turn, choice));
        debug!(%player, turn, %phase, choice = %choice.label(self.state.registry()), "decision");
        Ok(outcome)
    }

    fn end_phase(&mut self, player: PlayerId, outcome: &mut DecisionOutcome) -> Result<()> {
        match self.phase() {
            Phase::Action => {
                self.transition(player, PhaseEvent::EndPhase)?;
                outcome.entered.push(Phase::Buy);
            }
            Phase::Buy => {
                // the hook runs while still in BUY; a failing hook leaves no trace
                let snapshot = self.state.clone();
                if let Err(err) = self.rules.end_of_buy_phase(&mut self.state, player) {
                    self.state = snapshot;
                    return Err(err);
                }
                self.transition(player, PhaseEvent::EndPhase)?;
                outcome.entered.push(Phase::Cleanup);
                self.cleanup(player)?;
                outcome.entered.push(Phase::None);
                outcome.turn_ended = true;

                if self.end_triggered {
                    self.finish()?;
                    outcome.game_over = true;
                } else {
                    self.current = player.next(self.state.player_count());
                }
            }
            from @ (Phase::None | Phase::Cleanup) => {
                return Err(EngineError::IllegalTransition {
                    from,
                    event: PhaseEvent::EndPhase,
                })
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, player: PlayerId) -> Result<()> {
        let zones = &mut self.state.player_mut(player).zones;
        zones.move_all(ZoneKind::Hand, ZoneKind::Discard);
        zones.move_all(ZoneKind::Played, ZoneKind::Discard);
        zones.move_all(ZoneKind::Defer, ZoneKind::Discard);
        let ps = self.state.player_mut(player);
        ps.actions = 0;
        ps.buys = 0;
        ps.coins = 0;
        self.state.draw(player, HAND_SIZE);

        self.state.validate_conservation()?;

        let turn = self.state.player(player).turn_number;
        self.turns.push_back(TurnMarker { player, turn });
        self.transition(player, PhaseEvent::CleanupDone)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        for player in PlayerId::all(self.state.player_count()) {
            self.rules.end_of_game(&mut self.state, player)?;
        }
        self.game_over = true;
        info!(winner = ?self.winner(), scores = ?self.scores(), "game over");
        Ok(())
    }

    fn transition(&mut self, player: PlayerId, event: PhaseEvent) -> Result<Phase> {
        let ps = self.state.player_mut(player);
        let from = ps.phase;
        let to = from
            .transition(event)
            .ok_or(EngineError::IllegalTransition { from, event })?;
        ps.phase = to;
        trace!(%player, %from, %to, "phase");
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Catalog, CardRegistry};
    use crate::rules::BaseRules;
    use std::sync::Arc;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn game() -> Game<BaseRules> {
        let registry = Arc::new(CardRegistry::build(&Catalog::standard(), &["Smithy", "Village"]).unwrap());
        let mut game = Game::new(BaseRules, GameState::new(registry, 2, 42));
        game.start();
        game
    }

    #[test]
    fn test_start() {
        let g = game();
        assert_eq!(g.current_player(), P0);
        assert_eq!(g.phase(), Phase::None);
        assert!(!g.is_game_over());
        assert!(g.state().validate_conservation().is_ok());
    }

    #[test]
    fn test_begin_turn_resets_resources() {
        let mut g = game();
        assert_eq!(g.begin_turn().unwrap(), TurnStart::Started(P0));
        let ps = g.state().player(P0);
        assert_eq!((ps.actions, ps.buys, ps.coins), (1, 1, 0));
        assert_eq!(ps.turn_number, 1);
        assert_eq!(g.phase(), Phase::Action);
    }

    #[test]
    fn test_begin_turn_twice_is_illegal() {
        let mut g = game();
        g.begin_turn().unwrap();
        let err = g.begin_turn().unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalTransition {
                from: Phase::Action,
                event: PhaseEvent::StartTurn
            }
        );
    }

    #[test]
    fn test_decide_outside_turn() {
        let mut g = game();
        assert_eq!(g.decide(Choice::EndPhase).unwrap_err(), EngineError::NotMidTurn(Phase::None));
    }

    #[test]
    fn test_full_turn_passes_to_next_seat() {
        let mut g = game();
        g.begin_turn().unwrap();

        let outcome = g.decide(Choice::EndPhase).unwrap();
        assert_eq!(outcome.entered.as_slice(), &[Phase::Buy]);
        assert!(!outcome.turn_ended);

        let outcome = g.decide(Choice::EndPhase).unwrap();
        assert_eq!(outcome.entered.as_slice(), &[Phase::Cleanup, Phase::None]);
        assert!(outcome.turn_ended);

        assert_eq!(g.current_player(), P1);
        assert_eq!(g.state().player(P0).phase, Phase::None);
        assert_eq!(g.state().player(P0).zones.hand.len(), HAND_SIZE);
        assert_eq!(g.turns().len(), 1);
        assert_eq!(g.turns()[0], TurnMarker { player: P0, turn: 1 });
    }

    #[test]
    fn test_skip_turn() {
        let mut g = game();
        g.state_mut().player_mut(P0).skip_turn = true;

        assert_eq!(g.begin_turn().unwrap(), TurnStart::Skipped(P0));
        assert!(!g.state().player(P0).skip_turn);
        assert_eq!(g.state().player(P0).turn_number, 1);
        assert_eq!(g.current_player(), P1);
        assert_eq!(g.phase(), Phase::None);

        assert_eq!(g.begin_turn().unwrap(), TurnStart::Started(P1));
    }

    #[test]
    fn test_illegal_choice_rejected_without_change() {
        let mut g = game();
        g.begin_turn().unwrap();
        let before = g.state().player(P0).clone();

        let err = g.decide(Choice::Buy(CardId::PROVINCE)).unwrap_err();
        assert!(err.is_invalid_decision());
        assert_eq!(g.decide(Choice::Unavailable).unwrap_err(), EngineError::UnavailableChoice);
        assert_eq!(g.state().player(P0), &before);
        assert!(g.history().is_empty());
    }

    #[test]
    fn test_spend_and_buy_recorded() {
        let mut g = game();
        g.begin_turn().unwrap();
        g.decide(Choice::EndPhase).unwrap();

        let coins = g.state().hand_treasure_value(P0);
        let outcome = g.decide(Choice::SpendAll).unwrap();
        assert_eq!(outcome.delta.coins_gained, coins);
        assert!(outcome.entered.is_empty());

        let outcome = g.decide(Choice::Buy(CardId::COPPER)).unwrap();
        assert_eq!(outcome.delta.buys_used, 1);
        assert_eq!(g.history().len(), 3);
        assert_eq!(g.state().player(P0).used_buys, 1);
    }

    #[test]
    fn test_winner_requires_unique_leader() {
        let mut g = game();
        assert_eq!(g.winner(), None);
        g.state_mut().gain(P1, CardId::DUCHY, ZoneKind::Discard).unwrap();
        assert_eq!(g.winner(), Some(P1));
    }

    #[test]
    fn test_three_empty_piles_end_condition() {
        let mut g = game();
        assert!(!g.end_condition_met());
        for card in [CardId::new(7), CardId::new(8)] {
            g.state_mut().supply.set_count(card, 0);
        }
        assert!(!g.end_condition_met());
        g.state_mut().supply.set_count(CardId::CURSE, 0);
        assert!(g.end_condition_met());
    }
}
