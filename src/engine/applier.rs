//! Decision applier: commits one choice through the rules collaborator and
//! reports what it consumed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::action::Choice;
use crate::core::error::{EngineError, Result};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::RulesEngine;

/// Resource changes caused by one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDelta {
    /// Actions consumed (`before.actions - after.actions` when it dropped).
    pub actions_used: u32,
    /// Buys consumed (`before.buys - after.buys` when it dropped).
    pub buys_used: u32,
    pub coins_gained: u32,
    pub coins_spent: u32,
    /// Cards the acting player gained, in order.
    pub gained: SmallVec<[CardId; 4]>,
}

impl ResourceDelta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply `choice` for `player`.
///
/// `EndPhase` changes nothing here; phase changes belong to the state
/// machine. `Unavailable` fails with `UnavailableChoice`. On any error the
/// state is left as it was.
pub fn apply<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    player: PlayerId,
    choice: Choice,
) -> Result<ResourceDelta> {
    let before = state.player(player);
    let (actions, buys, coins) = (before.actions, before.buys, before.coins);
    let gained_before = before.gained_this_turn.len();

    match choice {
        Choice::Unavailable => return Err(EngineError::UnavailableChoice),
        Choice::EndPhase => {}
        Choice::PlayAction(card) => rules.play_action(state, player, card)?,
        Choice::PlayTreasure(card) => rules.play_treasure(state, player, card)?,
        Choice::SpendAll => {
            rules.spend_all(state, player)?;
        }
        Choice::Buy(card) => rules.buy(state, player, card)?,
    }

    let after = state.player_mut(player);
    let delta = ResourceDelta {
        actions_used: actions.saturating_sub(after.actions),
        buys_used: buys.saturating_sub(after.buys),
        coins_gained: after.coins.saturating_sub(coins),
        coins_spent: coins.saturating_sub(after.coins),
        gained: after.gained_this_turn.iter().skip(gained_before).copied().collect(),
    };
    after.used_actions += delta.actions_used;
    after.used_buys += delta.buys_used;

    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Catalog, CardRegistry};
    use crate::rules::BaseRules;
    use crate::zones::ZoneKind;
    use std::sync::Arc;

    const P0: PlayerId = PlayerId::new(0);

    fn state() -> GameState {
        let registry = Arc::new(
            CardRegistry::build(&Catalog::standard(), &["Village", "Smithy"]).unwrap(),
        );
        let mut state = GameState::new(registry, 2, 3);
        state.deal_starting_decks();
        state.player_mut(P0).reset_resources();
        state
    }

    #[test]
    fn test_unavailable_fails_loudly() {
        let mut s = state();
        let before = s.player(P0).clone();
        let err = apply(&BaseRules, &mut s, P0, Choice::Unavailable).unwrap_err();
        assert_eq!(err, EngineError::UnavailableChoice);
        assert_eq!(s.player(P0), &before);
    }

    #[test]
    fn test_end_phase_is_noop() {
        let mut s = state();
        let delta = apply(&BaseRules, &mut s, P0, Choice::EndPhase).unwrap();
        assert!(delta.is_empty());
    }

    #[test]
    fn test_smithy_uses_an_action() {
        let mut s = state();
        let smithy = s.registry().require("Smithy").unwrap();
        s.gain(P0, smithy, ZoneKind::Hand).unwrap();
        s.player_mut(P0).gained_this_turn.clear();

        let delta = apply(&BaseRules, &mut s, P0, Choice::PlayAction(smithy)).unwrap();
        assert_eq!(delta.actions_used, 1);
        assert_eq!(delta.buys_used, 0);
        assert_eq!(s.player(P0).used_actions, 1);
    }

    #[test]
    fn test_village_nets_actions_so_none_used() {
        let mut s = state();
        let village = s.registry().require("Village").unwrap();
        s.gain(P0, village, ZoneKind::Hand).unwrap();

        let delta = apply(&BaseRules, &mut s, P0, Choice::PlayAction(village)).unwrap();
        assert_eq!(delta.actions_used, 0);
        assert_eq!(s.player(P0).actions, 2);
    }

    #[test]
    fn test_buy_reports_gain_and_buy_used() {
        let mut s = state();
        s.player_mut(P0).coins = 6;

        let delta = apply(&BaseRules, &mut s, P0, Choice::Buy(CardId::GOLD)).unwrap();
        assert_eq!(delta.buys_used, 1);
        assert_eq!(delta.actions_used, 0);
        assert_eq!(delta.coins_spent, 6);
        assert_eq!(delta.gained.as_slice(), &[CardId::GOLD]);
        assert_eq!(s.player(P0).used_buys, 1);
    }

    #[test]
    fn test_spend_all_gains_coins() {
        let mut s = state();
        let value = s.hand_treasure_value(P0);
        let delta = apply(&BaseRules, &mut s, P0, Choice::SpendAll).unwrap();
        assert_eq!(delta.coins_gained, value);
        assert_eq!(s.player(P0).coins, value);
        assert_eq!(s.hand_treasure_value(P0), 0);
    }
}
