//! The shared, non-replenishing supply.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardKind, CardRegistry};
use crate::core::error::{EngineError, Result};

/// One pile per card in the vocabulary, stored as counts indexed by
/// `CardId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    piles: Vec<u32>,
}

impl Supply {
    /// Standard pile sizes for a table of `player_count`.
    ///
    /// Copper is sized as if the starting decks were already dealt from it.
    #[must_use]
    pub fn standard(registry: &CardRegistry, player_count: usize) -> Self {
        let players = player_count as u32;
        let victory = if player_count == 2 { 8 } else { 12 };
        let piles = registry
            .iter()
            .map(|(id, def)| match id {
                CardId::COPPER => 60u32.saturating_sub(7 * players),
                CardId::SILVER => 40,
                CardId::GOLD => 30,
                CardId::ESTATE | CardId::DUCHY | CardId::PROVINCE => victory,
                CardId::CURSE => 10 * players.saturating_sub(1),
                _ if def.kind == CardKind::Victory => victory,
                _ => 10,
            })
            .collect();
        Self { piles }
    }

    /// Cards left in a pile; zero for ids outside the vocabulary.
    #[must_use]
    pub fn count(&self, card: CardId) -> u32 {
        self.piles.get(card.index()).copied().unwrap_or(0)
    }

    pub fn set_count(&mut self, card: CardId, count: u32) {
        if let Some(pile) = self.piles.get_mut(card.index()) {
            *pile = count;
        }
    }

    /// Take one card from a pile.
    pub fn take(&mut self, card: CardId) -> Result<()> {
        match self.piles.get_mut(card.index()) {
            Some(pile) if *pile > 0 => {
                *pile -= 1;
                Ok(())
            }
            _ => Err(EngineError::EmptySupply(card)),
        }
    }

    #[must_use]
    pub fn is_empty_pile(&self, card: CardId) -> bool {
        self.count(card) == 0
    }

    /// Number of piles with no cards left.
    #[must_use]
    pub fn empty_piles(&self) -> usize {
        self.piles.iter().filter(|&&n| n == 0).count()
    }

    /// Pile counts in vocabulary order.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.piles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::config::DEFAULT_KINGDOM;

    fn registry() -> CardRegistry {
        CardRegistry::build(&Catalog::standard(), &DEFAULT_KINGDOM).unwrap()
    }

    #[test]
    fn test_two_player_sizes() {
        let supply = Supply::standard(&registry(), 2);
        assert_eq!(supply.len(), 17);
        assert_eq!(supply.count(CardId::COPPER), 46);
        assert_eq!(supply.count(CardId::PROVINCE), 8);
        assert_eq!(supply.count(CardId::CURSE), 10);
        assert_eq!(supply.count(CardId::new(7)), 10);
        assert_eq!(supply.empty_piles(), 0);
    }

    #[test]
    fn test_four_player_sizes() {
        let supply = Supply::standard(&registry(), 4);
        assert_eq!(supply.count(CardId::COPPER), 32);
        assert_eq!(supply.count(CardId::ESTATE), 12);
        assert_eq!(supply.count(CardId::CURSE), 30);
    }

    #[test]
    fn test_take_until_empty() {
        let mut supply = Supply::standard(&registry(), 2);
        supply.set_count(CardId::SILVER, 1);
        supply.set_count(CardId::COPPER, 0);
        assert_eq!(supply.take(CardId::SILVER), Ok(()));
        assert_eq!(supply.take(CardId::SILVER), Err(EngineError::EmptySupply(CardId::SILVER)));
        assert_eq!(supply.take(CardId::COPPER), Err(EngineError::EmptySupply(CardId::COPPER)));
        assert_eq!(supply.take(CardId::new(200)), Err(EngineError::EmptySupply(CardId::new(200))));
        assert_eq!(supply.empty_piles(), 2);
        assert_eq!(supply.count(CardId::SILVER), 0);
    }
}
