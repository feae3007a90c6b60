//! Big-money scripted opponent.
//!
//! Never plays actions. In BUY it aims for the best of Province (8+),
//! Gold (6+) and Silver (3+) its coins allow. When the target is not
//! buyable yet because treasures are still in hand, it spends them all
//! first and remembers the budget for the follow-up decision.

use tracing::trace;

use super::{position, Policy, PlayerView};
use crate::cards::CardId;
use crate::core::action::Choice;
use crate::core::phase::Phase;

/// Purchase targets, best first.
const TIERS: [&str; 3] = ["Province", "Gold", "Silver"];

/// Deterministic treasure-and-Province policy.
#[derive(Clone, Debug, Default)]
pub struct BigMoney {
    /// Budget carried from a spend-all decision to the buy after it.
    pending_spend: Option<u32>,
}

impl BigMoney {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending_spend(&self) -> Option<u32> {
        self.pending_spend
    }

    /// Carry a budget into the next decision.
    #[must_use]
    pub fn with_pending_spend(mut self, coins: u32) -> Self {
        self.pending_spend = Some(coins);
        self
    }

    /// Tier cards affordable with `budget`, best first.
    fn targets<'v>(view: &'v PlayerView<'v>, budget: u32) -> impl Iterator<Item = CardId> + 'v {
        TIERS
            .iter()
            .filter_map(move |name| view.registry.id(name))
            .filter(move |&card| view.cost(card).is_some_and(|cost| cost <= budget))
    }

    fn choose_buy(&mut self, view: &PlayerView<'_>, choices: &[Choice]) -> Option<usize> {
        let in_hand = view.hand_treasure_value();
        let budget = match self.pending_spend {
            Some(pending) if in_hand == 0 => pending,
            _ => view.coins + in_hand,
        };

        if let Some(index) = Self::targets(view, budget)
            .find_map(|card| position(choices, Choice::Buy(card)))
        {
            self.pending_spend = None;
            return Some(index);
        }

        if view.buys > 0 && Self::targets(view, budget).next().is_some() {
            if let Some(index) = position(choices, Choice::SpendAll) {
                self.pending_spend = Some(budget);
                return Some(index);
            }
        }

        self.pending_spend = None;
        None
    }
}

impl Policy for BigMoney {
    fn choose(&mut self, view: &PlayerView<'_>, choices: &[Choice]) -> usize {
        let end = position(choices, Choice::EndPhase).unwrap_or(0);
        let index = match view.phase {
            Phase::Buy => self.choose_buy(view, choices).unwrap_or(end),
            Phase::Action | Phase::None | Phase::Cleanup => end,
        };
        trace!(player = %view.player, choice = ?choices.get(index), "big money");
        index
    }

    fn reset(&mut self) {
        self.pending_spend = None;
    }

    fn name(&self) -> &str {
        "big_money"
    }
}
