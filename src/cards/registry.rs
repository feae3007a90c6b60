//! Card vocabulary for one game.
//!
//! The registry assigns `CardId`s: base cards first in a fixed order, then
//! the kingdom sorted by name. That order is the observation's card axis and
//! the supply's iteration order.

use rustc_hash::FxHashMap;
use std::ops::Index;

use super::catalog::{Catalog, BASE_CARDS};
use super::definition::{CardDef, CardId, CardKind};
use crate::core::error::{EngineError, Result};

/// Vocabulary of card definitions, indexed by `CardId`.
///
/// ## Example
///
/// ```
/// use rust_dominion::cards::{Catalog, CardId, CardRegistry};
///
/// let registry = CardRegistry::build(&Catalog::standard(), &["Village", "Smithy"]).unwrap();
///
/// assert_eq!(registry.len(), 9);
/// assert_eq!(registry[CardId::PROVINCE].name, "Province");
/// assert_eq!(registry.name(CardId::new(7)), "Smithy");
/// ```
#[derive(Clone, Debug)]
pub struct CardRegistry {
    cards: Vec<CardDef>,
    by_name: FxHashMap<String, CardId>,
}

impl CardRegistry {
    /// Build the vocabulary for the base cards plus `kingdom`.
    ///
    /// Kingdom names are sorted and de-duplicated; names already among the
    /// base cards are ignored.
    pub fn build<S: AsRef<str>>(catalog: &Catalog, kingdom: &[S]) -> Result<Self> {
        let mut kingdom: Vec<&str> = kingdom
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !BASE_CARDS.contains(name))
            .collect();
        kingdom.sort_unstable();
        kingdom.dedup();

        let mut cards = Vec::with_capacity(BASE_CARDS.len() + kingdom.len());
        for name in BASE_CARDS.iter().copied().chain(kingdom) {
            let def = catalog
                .get(name)
                .ok_or_else(|| EngineError::UnknownCard(name.to_string()))?;
            cards.push(def.clone());
        }

        let by_name = cards
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), CardId::new(i as u16)))
            .collect();

        Ok(Self { cards, by_name })
    }

    /// Number of cards in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDef> {
        self.cards.get(id.index())
    }

    /// Look up a card id by exact name.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Like [`CardRegistry::id`] but failing with `UnknownCard`.
    pub fn require(&self, name: &str) -> Result<CardId> {
        self.id(name)
            .ok_or_else(|| EngineError::UnknownCard(name.to_string()))
    }

    /// Display name, or `"?"` for an id outside the vocabulary.
    #[must_use]
    pub fn name(&self, id: CardId) -> &str {
        self.get(id).map_or("?", |def| def.name.as_str())
    }

    /// Iterate over (id, definition) pairs in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardDef)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, def)| (CardId::new(i as u16), def))
    }

    /// All ids in vocabulary order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> {
        (0..self.cards.len() as u16).map(CardId::new)
    }

    /// Ids of the given kind.
    pub fn of_kind(&self, kind: CardKind) -> impl Iterator<Item = CardId> + '_ {
        self.iter()
            .filter(move |(_, def)| def.kind == kind)
            .map(|(id, _)| id)
    }
}

impl Index<CardId> for CardRegistry {
    type Output = CardDef;

    fn index(&self, id: CardId) -> &Self::Output {
        &self.cards[id.index()]
    }
}
