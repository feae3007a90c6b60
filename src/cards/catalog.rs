//! Known card definitions.
//!
//! The catalog is everything a game *could* use; a [`CardRegistry`]
//! (see `registry.rs`) is the vocabulary one game actually uses.
//!
//! [`CardRegistry`]: super::CardRegistry

use rustc_hash::FxHashMap;

use super::definition::{CardDef, Effect};

/// Base cards, in vocabulary order.
pub const BASE_CARDS: [&str; 7] = ["Copper", "Silver", "Gold", "Estate", "Duchy", "Province", "Curse"];

/// Lookup of card definitions by name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: FxHashMap<String, CardDef>,
}

impl Catalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base treasure/victory/curse cards plus the action cards
    /// whose effects need no sub-choice.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.insert(CardDef::treasure("Copper", 0, 1));
        catalog.insert(CardDef::treasure("Silver", 3, 2));
        catalog.insert(CardDef::treasure("Gold", 6, 3));
        catalog.insert(CardDef::victory("Estate", 2, 1));
        catalog.insert(CardDef::victory("Duchy", 5, 3));
        catalog.insert(CardDef::victory("Province", 8, 6));
        catalog.insert(CardDef::curse());

        catalog.insert(
            CardDef::action("Council Room", 5)
                .with_effect(Effect::DrawCards(4))
                .with_effect(Effect::AddBuys(1))
                .with_effect(Effect::OthersDraw(1)),
        );
        catalog.insert(
            CardDef::action("Festival", 5)
                .with_effect(Effect::AddActions(2))
                .with_effect(Effect::AddBuys(1))
                .with_effect(Effect::AddCoins(2)),
        );
        catalog.insert(
            CardDef::action("Laboratory", 5)
                .with_effect(Effect::DrawCards(2))
                .with_effect(Effect::AddActions(1)),
        );
        catalog.insert(
            CardDef::action("Market", 5)
                .with_effect(Effect::DrawCards(1))
                .with_effect(Effect::AddActions(1))
                .with_effect(Effect::AddBuys(1))
                .with_effect(Effect::AddCoins(1)),
        );
        catalog.insert(CardDef::action("Moat", 2).with_effect(Effect::DrawCards(2)));
        catalog.insert(CardDef::action("Moneylender", 4).with_effect(Effect::TrashFromHand {
            card: "Copper".into(),
            coins: 3,
        }));
        catalog.insert(CardDef::action("Smithy", 4).with_effect(Effect::DrawCards(3)));
        catalog.insert(
            CardDef::action("Village", 3)
                .with_effect(Effect::DrawCards(1))
                .with_effect(Effect::AddActions(2)),
        );
        catalog.insert(
            CardDef::action("Witch", 5)
                .with_effect(Effect::DrawCards(2))
                .with_effect(Effect::OthersGain("Curse".into())),
        );
        catalog.insert(
            CardDef::action("Woodcutter", 3)
                .with_effect(Effect::AddBuys(1))
                .with_effect(Effect::AddCoins(2)),
        );
        catalog.insert(
            CardDef::action("Wharf", 5)
                .with_effect(Effect::DrawCards(2))
                .with_effect(Effect::AddBuys(1))
                .with_next_turn(Effect::DrawCards(2))
                .with_next_turn(Effect::AddBuys(1)),
        );

        catalog
    }

    /// Add or replace a definition.
    pub fn insert(&mut self, card: CardDef) {
        self.cards.insert(card.name.clone(), card);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardDef> {
        self.cards.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
