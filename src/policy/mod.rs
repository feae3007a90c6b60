//! Decision policies.
//!
//! A policy sees only what the seat it plays may legally see (its own
//! hand and resources, and the public supply) and picks an index into the
//! enumerated option list, the same contract any external agent uses.
//!
//! - `BigMoney`: Scripted baseline that buys treasure and Provinces
//! - `RandomPolicy`: Uniform over available options

pub mod big_money;
pub mod random;

pub use big_money::BigMoney;
pub use random::RandomPolicy;

use crate::cards::{CardId, CardRegistry};
use crate::core::action::Choice;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::zones::{Supply, Zone};

/// What a seat may see when deciding.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView<'a> {
    pub player: PlayerId,
    pub phase: Phase,
    pub actions: u32,
    pub buys: u32,
    pub coins: u32,
    pub hand: &'a Zone,
    pub supply: &'a Supply,
    pub registry: &'a CardRegistry,
}

impl<'a> PlayerView<'a> {
    /// View of `player` within `state`.
    #[must_use]
    pub fn new(state: &'a GameState, player: PlayerId) -> Self {
        let ps = state.player(player);
        Self {
            player,
            phase: ps.phase,
            actions: ps.actions,
            buys: ps.buys,
            coins: ps.coins,
            hand: &ps.zones.hand,
            supply: &state.supply,
            registry: state.registry(),
        }
    }

    /// Coin value of treasures still in hand.
    #[must_use]
    pub fn hand_treasure_value(&self) -> u32 {
        self.hand
            .iter()
            .filter_map(|card| self.registry.get(card))
            .filter(|def| def.is_treasure())
            .map(|def| def.coins)
            .sum()
    }

    /// Cost of a card, if it is in the vocabulary.
    #[must_use]
    pub fn cost(&self, card: CardId) -> Option<u32> {
        self.registry.get(card).map(|def| def.cost)
    }
}

/// Chooses among enumerated options.
pub trait Policy: Send {
    /// Index into `choices`. `choices` is never empty and may contain
    /// `Unavailable` padding, which a policy must not pick.
    fn choose(&mut self, view: &PlayerView<'_>, choices: &[Choice]) -> usize;

    /// Forget any state carried between decisions.
    fn reset(&mut self) {}

    fn name(&self) -> &str;
}

/// Index of `choice` in `choices`.
pub(crate) fn position(choices: &[Choice], choice: Choice) -> Option<usize> {
    choices.iter().position(|&c| c == choice)
}
