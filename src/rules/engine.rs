//! Rules collaborator trait.
//!
//! The turn state machine never interprets card text. Everything a card
//! does happens behind this trait:
//! - Playing an action or treasure
//! - Buying from the supply
//! - Turn-start, end-of-buy and end-of-game hooks
//! - Scoring

use crate::cards::CardId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Rules collaborator.
///
/// ## Implementation Notes
///
/// - Every method receives the whole `GameState`; effects may touch other
///   players (attacks, shared draws).
/// - A method that returns `Err` must leave the state untouched.
/// - Only moves between zones, the supply and the trash are allowed, so
///   card conservation holds.
pub trait RulesEngine {
    /// Play an action card from hand. Spends one action.
    fn play_action(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<()>;

    /// Play a treasure card from hand for its coin value.
    fn play_treasure(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<()>;

    /// Buy a card from the supply into the discard pile. Spends one buy.
    fn buy(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<()>;

    /// Called after resources are reset, before the first decision of a turn.
    fn start_of_turn(&self, _state: &mut GameState, _player: PlayerId) -> Result<()> {
        Ok(())
    }

    /// Called once when a player leaves BUY, before cleanup.
    fn end_of_buy_phase(&self, _state: &mut GameState, _player: PlayerId) -> Result<()> {
        Ok(())
    }

    /// Called once per player after the game ends.
    fn end_of_game(&self, _state: &mut GameState, _player: PlayerId) -> Result<()> {
        Ok(())
    }

    /// Current score of a player.
    fn score(&self, state: &GameState, player: PlayerId) -> i32 {
        state.victory_points(player)
    }

    // === Convenience Methods ===

    /// Play every treasure in hand, in vocabulary order.
    ///
    /// Returns the number of treasures played.
    fn spend_all(&self, state: &mut GameState, player: PlayerId) -> Result<usize> {
        let mut treasures: Vec<CardId> = state
            .player(player)
            .zones
            .hand
            .iter()
            .filter(|&card| state.registry().get(card).is_some_and(|def| def.is_treasure()))
            .collect();
        treasures.sort_unstable();

        for &card in &treasures {
            self.play_treasure(state, player, card)?;
        }
        Ok(treasures.len())
    }
}
