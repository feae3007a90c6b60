//! Legal-option enumeration and masking.
//!
//! ## Ordering
//!
//! The list order is the meaning of an action index, so it depends only on
//! the state:
//!
//! - `EndPhase` is always slot 0, in every phase.
//! - ACTION: one `PlayAction` per distinct action card in hand, in
//!   vocabulary order, when the player has an action left.
//! - BUY: `SpendAll` (if any treasure is in hand), one `PlayTreasure` per
//!   distinct treasure in hand, then one `Buy` per affordable non-empty
//!   pile (when a buy is left), all in vocabulary order.
//!
//! The enumerator never returns an empty list. Padding to a fixed width is
//! done by `mask`/`padded`, not here.

use smallvec::SmallVec;

use crate::cards::{CardId, CardKind, CardRegistry};
use crate::core::action::Choice;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Enumerated options; inline for typical list sizes.
pub type ChoiceList = SmallVec<[Choice; 16]>;

/// Legal options for `player` in `phase`.
#[must_use]
pub fn enumerate(state: &GameState, player: PlayerId, phase: Phase) -> ChoiceList {
    let mut choices = ChoiceList::new();
    choices.push(Choice::EndPhase);

    let ps = state.player(player);
    let registry = state.registry();
    let mut in_hand = vec![0u32; registry.len()];
    ps.zones.hand.tally_into(&mut in_hand);
    let held = |kind: CardKind| {
        registry
            .of_kind(kind)
            .filter(|id| in_hand[id.index()] > 0)
            .collect::<SmallVec<[CardId; 8]>>()
    };

    match phase {
        Phase::Action => {
            if ps.actions > 0 {
                choices.extend(held(CardKind::Action).into_iter().map(Choice::PlayAction));
            }
        }
        Phase::Buy => {
            let treasures = held(CardKind::Treasure);
            if !treasures.is_empty() {
                choices.push(Choice::SpendAll);
                choices.extend(treasures.into_iter().map(Choice::PlayTreasure));
            }
            if ps.buys > 0 {
                choices.extend(
                    registry
                        .iter()
                        .filter(|(id, def)| state.supply.count(*id) > 0 && def.cost <= ps.coins)
                        .map(|(id, _)| Choice::Buy(id)),
                );
            }
        }
        Phase::None | Phase::Cleanup => {}
    }

    choices
}

/// Longest list `enumerate` can return for this vocabulary.
///
/// A BUY phase with every treasure in hand and every pile affordable holds
/// `EndPhase`, `SpendAll`, one slot per treasure and one per pile.
#[must_use]
pub fn max_options(registry: &CardRegistry) -> usize {
    2 + registry.of_kind(CardKind::Treasure).count() + registry.len()
}

/// Pad or truncate `choices` to exactly `width` slots.
#[must_use]
pub fn padded(choices: &[Choice], width: usize) -> Vec<Choice> {
    (0..width)
        .map(|i| choices.get(i).copied().unwrap_or(Choice::Unavailable))
        .collect()
}

/// Fixed-width validity mask: 1 for an available slot, 0 otherwise.
#[must_use]
pub fn mask(choices: &[Choice], width: usize) -> Vec<u8> {
    padded(choices, width)
        .into_iter()
        .map(|c| u8::from(c.is_available()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Catalog, CardRegistry};
    use crate::zones::Zone;
    use std::sync::Arc;

    const P0: PlayerId = PlayerId::new(0);

    fn state(hand: &[&str]) -> GameState {
        let registry = Arc::new(
            CardRegistry::build(&Catalog::standard(), &["Village", "Smithy", "Market"]).unwrap(),
        );
        let mut state = GameState::new(registry, 2, 1);
        let cards: Zone = hand
            .iter()
            .map(|name| state.registry().require(name).unwrap())
            .collect();
        let ps = state.player_mut(P0);
        ps.reset_resources();
        ps.zones.hand = cards;
        state
    }

    fn id(state: &GameState, name: &str) -> CardId {
        state.registry().require(name).unwrap()
    }

    #[test]
    fn test_action_phase_distinct_cards_in_vocabulary_order() {
        let s = state(&["Village", "Copper", "Smithy", "Village"]);
        let choices = enumerate(&s, P0, Phase::Action);
        assert_eq!(
            choices.as_slice(),
            &[
                Choice::EndPhase,
                Choice::PlayAction(id(&s, "Smithy")),
                Choice::PlayAction(id(&s, "Village")),
            ]
        );
    }

    #[test]
    fn test_no_actions_left_only_end_phase() {
        let mut s = state(&["Village", "Smithy"]);
        s.player_mut(P0).actions = 0;
        let choices = enumerate(&s, P0, Phase::Action);
        assert_eq!(choices.as_slice(), &[Choice::EndPhase]);
    }

    #[test]
    fn test_buy_phase_with_treasures() {
        let s = state(&["Copper", "Silver", "Copper", "Estate"]);
        let choices = enumerate(&s, P0, Phase::Buy);
        // coins are 0: only the zero-cost piles are buyable
        assert_eq!(
            choices.as_slice(),
            &[
                Choice::EndPhase,
                Choice::SpendAll,
                Choice::PlayTreasure(CardId::COPPER),
                Choice::PlayTreasure(CardId::SILVER),
                Choice::Buy(CardId::COPPER),
                Choice::Buy(CardId::CURSE),
            ]
        );
    }

    #[test]
    fn test_buy_phase_affordability_and_empty_piles() {
        let mut s = state(&[]);
        s.player_mut(P0).coins = 8;
        s.supply.set_count(CardId::GOLD, 0);
        let choices = enumerate(&s, P0, Phase::Buy);

        assert!(choices.contains(&Choice::Buy(CardId::PROVINCE)));
        assert!(!choices.contains(&Choice::Buy(CardId::GOLD)));
        assert!(!choices.contains(&Choice::SpendAll));
        assert_eq!(choices.len(), 1 + s.registry().len() - 1);
    }

    #[test]
    fn test_no_buys_left() {
        let mut s = state(&["Gold"]);
        s.player_mut(P0).buys = 0;
        s.player_mut(P0).coins = 10;
        let choices = enumerate(&s, P0, Phase::Buy);
        assert_eq!(
            choices.as_slice(),
            &[Choice::EndPhase, Choice::SpendAll, Choice::PlayTreasure(CardId::GOLD)]
        );
    }

    #[test]
    fn test_never_empty() {
        let s = state(&[]);
        for phase in [Phase::None, Phase::Action, Phase::Buy, Phase::Cleanup] {
            assert!(!enumerate(&s, P0, phase).is_empty());
        }
    }

    /// A rich BUY phase fills exactly the computed maximum.
    #[test]
    fn test_max_options_reached_in_rich_buy_phase() {
        let mut s = state(&["Copper", "Silver", "Gold", "Gold"]);
        s.player_mut(P0).coins = 20;
        let choices = enumerate(&s, P0, Phase::Buy);
        assert_eq!(max_options(s.registry()), 15);
        assert_eq!(choices.len(), max_options(s.registry()));
    }

    #[test]
    fn test_mask_matches_padding() {
        let choices = [Choice::EndPhase, Choice::SpendAll];
        assert_eq!(mask(&choices, 4), vec![1, 1, 0, 0]);
        assert_eq!(padded(&choices, 3)[2], Choice::Unavailable);
        assert_eq!(mask(&choices, 1), vec![1]);
    }
}
