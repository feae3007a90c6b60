//! Card definitions - static card data.
//!
//! A `CardDef` is the immutable identity of a card: name, cost, kind and the
//! effect list the rules collaborator resolves when it is played. Physical
//! copies are interchangeable, so zones store only `CardId`s.

use serde::{Deserialize, Serialize};

/// Index of a card in the game's vocabulary.
///
/// The seven base cards always occupy ids 0-6 in the order Copper, Silver,
/// Gold, Estate, Duchy, Province, Curse; kingdom cards follow
/// alphabetically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    pub const COPPER: CardId = CardId(0);
    pub const SILVER: CardId = CardId(1);
    pub const GOLD: CardId = CardId(2);
    pub const ESTATE: CardId = CardId(3);
    pub const DUCHY: CardId = CardId(4);
    pub const PROVINCE: CardId = CardId(5);
    pub const CURSE: CardId = CardId(6);

    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Treasure,
    Victory,
    Action,
    Curse,
}

/// An atomic card effect, resolved by the rules collaborator.
///
/// Card names inside effects are resolved against the game's registry when
/// the effect fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// +N cards.
    DrawCards(u32),
    /// +N actions.
    AddActions(u32),
    /// +N buys.
    AddBuys(u32),
    /// +N coins.
    AddCoins(u32),
    /// Each other player draws N cards.
    OthersDraw(u32),
    /// Each other player gains a copy of the named card, if the pile has one.
    OthersGain(String),
    /// Trash one copy of the named card from hand; if you did, +coins.
    TrashFromHand { card: String, coins: u32 },
}

/// Static card definition.
///
/// ```
/// use rust_dominion::cards::{CardDef, CardKind, Effect};
///
/// let smithy = CardDef::action("Smithy", 4).with_effect(Effect::DrawCards(3));
/// assert_eq!(smithy.kind, CardKind::Action);
/// assert_eq!(smithy.cost, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDef {
    pub name: String,
    pub cost: u32,
    pub kind: CardKind,

    /// Coins produced when played as a treasure.
    pub coins: u32,

    /// Victory points while owned (negative for curses).
    pub victory_points: i32,

    /// Effects resolved when played.
    pub on_play: Vec<Effect>,

    /// Effects resolved at the start of the owner's next turn. A card with
    /// any stays in the duration zone until then.
    pub next_turn: Vec<Effect>,
}

impl CardDef {
    fn blank(name: impl Into<String>, cost: u32, kind: CardKind) -> Self {
        Self {
            name: name.into(),
            cost,
            kind,
            coins: 0,
            victory_points: 0,
            on_play: Vec::new(),
            next_turn: Vec::new(),
        }
    }

    #[must_use]
    pub fn treasure(name: impl Into<String>, cost: u32, coins: u32) -> Self {
        Self {
            coins,
            ..Self::blank(name, cost, CardKind::Treasure)
        }
    }

    #[must_use]
    pub fn victory(name: impl Into<String>, cost: u32, points: i32) -> Self {
        Self {
            victory_points: points,
            ..Self::blank(name, cost, CardKind::Victory)
        }
    }

    #[must_use]
    pub fn curse() -> Self {
        Self {
            victory_points: -1,
            ..Self::blank("Curse", 0, CardKind::Curse)
        }
    }

    #[must_use]
    pub fn action(name: impl Into<String>, cost: u32) -> Self {
        Self::blank(name, cost, CardKind::Action)
    }

    /// Add an on-play effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.on_play.push(effect);
        self
    }

    /// Add a next-turn effect, making this a duration card.
    #[must_use]
    pub fn with_next_turn(mut self, effect: Effect) -> Self {
        self.next_turn.push(effect);
        self
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        self.kind == CardKind::Action
    }

    #[must_use]
    pub fn is_treasure(&self) -> bool {
        self.kind == CardKind::Treasure
    }

    #[must_use]
    pub fn is_duration(&self) -> bool {
        !self.next_turn.is_empty()
    }
}
