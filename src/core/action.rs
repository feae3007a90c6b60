//! Decision representation.
//!
//! A `Choice` is one option offered at a decision point. The option list is
//! the meaning of an integer action index, so `Choice` is a closed set of
//! variants rather than an open record. Padding slots in a fixed-width
//! action space are `Choice::Unavailable`.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{CardId, CardRegistry};

/// One decision a player can make.
///
/// ## Example
///
/// ```
/// use rust_dominion::cards::CardId;
/// use rust_dominion::core::Choice;
///
/// let buy = Choice::Buy(CardId::PROVINCE);
/// assert!(buy.is_available());
/// assert_eq!(buy.card(), Some(CardId::PROVINCE));
/// assert!(!Choice::Unavailable.is_available());
/// assert!(Choice::EndPhase.is_end_phase());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Leave the current phase.
    EndPhase,
    /// Play an action card from hand.
    PlayAction(CardId),
    /// Play one treasure from hand.
    PlayTreasure(CardId),
    /// Play every treasure in hand.
    SpendAll,
    /// Buy a card from the supply.
    Buy(CardId),
    /// Masked slot; never legal.
    Unavailable,
}

impl Choice {
    #[must_use]
    pub fn is_available(self) -> bool {
        self != Choice::Unavailable
    }

    #[must_use]
    pub fn is_end_phase(self) -> bool {
        self == Choice::EndPhase
    }

    /// The card this choice refers to, if any.
    #[must_use]
    pub fn card(self) -> Option<CardId> {
        match self {
            Choice::PlayAction(card) | Choice::PlayTreasure(card) | Choice::Buy(card) => Some(card),
            Choice::EndPhase | Choice::SpendAll | Choice::Unavailable => None,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self, registry: &CardRegistry) -> String {
        match self {
            Choice::EndPhase => "End phase".to_string(),
            Choice::PlayAction(card) => format!("Play {}", registry.name(card)),
            Choice::PlayTreasure(card) => format!("Spend {}", registry.name(card)),
            Choice::SpendAll => "Spend all treasures".to_string(),
            Choice::Buy(card) => format!("Buy {}", registry.name(card)),
            Choice::Unavailable => "-".to_string(),
        }
    }
}

/// A committed decision, kept in the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub player: PlayerId,

    /// The player's turn number when the decision was made.
    pub turn: u32,

    pub choice: Choice,
}

impl ChoiceRecord {
    #[must_use]
    pub fn new(player: PlayerId, turn: u32, choice: Choice) -> Self {
        Self { player, turn, choice }
    }
}
